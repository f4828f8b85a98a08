use crate::coord::Coordinate;
use serde::{Deserialize, Serialize};

/// A rectangular search area given by two opposite corners.
///
/// Clients send the north-west and south-east corners, but any pair of opposite
/// corners is accepted: bounds are normalized on access.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryRect {
    /// First corner as sent by the client (north-west by convention)
    pub top_left: Coordinate,
    /// Opposite corner (south-east by convention)
    pub bottom_right: Coordinate,
}

impl QueryRect {
    /// Create a query rectangle from two opposite corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkspot_types::{Coordinate, QueryRect};
    ///
    /// let rect = QueryRect::new(Coordinate::new(11.0, 19.0), Coordinate::new(9.0, 21.0));
    /// assert_eq!(rect.latitude_bounds(), (9.0, 11.0));
    /// assert_eq!(rect.longitude_bounds(), (19.0, 21.0));
    /// ```
    pub fn new(top_left: Coordinate, bottom_right: Coordinate) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// `(low, high)` latitude bounds.
    pub fn latitude_bounds(&self) -> (f64, f64) {
        ordered(self.top_left.lat(), self.bottom_right.lat())
    }

    /// `(low, high)` longitude bounds.
    pub fn longitude_bounds(&self) -> (f64, f64) {
        ordered(self.top_left.lon(), self.bottom_right.lon())
    }

    /// Strict containment test, inclusive of the edges.
    ///
    /// The index answers queries approximately; this is the exact rectangle
    /// test used to compare against it.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let (lat_lo, lat_hi) = self.latitude_bounds();
        let (lon_lo, lon_hi) = self.longitude_bounds();
        (lat_lo..=lat_hi).contains(&coordinate.lat())
            && (lon_lo..=lon_hi).contains(&coordinate.lon())
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
