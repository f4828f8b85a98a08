//! Geographic coordinate wrapping the `geo` crate point type.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A latitude/longitude pair.
///
/// Stored as a `geo::Point` with x = longitude and y = latitude, but always
/// constructed latitude-first because that is the order used on the wire.
///
/// Equality and hashing compare the exact bit patterns of both components, so a
/// `Coordinate` can live in hash sets. No range validation is applied.
///
/// Serializes as the underlying point, `{"x": longitude, "y": latitude}`.
///
/// # Examples
///
/// ```
/// use parkspot_types::Coordinate;
///
/// let c = Coordinate::new(37.33182, -122.03118);
/// assert_eq!(c.lat(), 37.33182);
/// assert_eq!(c.lon(), -122.03118);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinate {
    inner: geo::Point<f64>,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            inner: geo::Point::new(longitude, latitude),
        }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.inner.y()
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.inner.x()
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat().is_finite() && self.lon().is_finite()
    }

    /// Access the inner `geo::Point`.
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    /// Convert into the inner `geo::Point`.
    #[inline]
    pub fn into_inner(self) -> geo::Point<f64> {
        self.inner
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat().to_bits() == other.lat().to_bits()
            && self.lon().to_bits() == other.lon().to_bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat().to_bits().hash(state);
        self.lon().to_bits().hash(state);
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self { inner: point }
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.inner
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Interprets the tuple as `(latitude, longitude)`.
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat(), self.lon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_latitude_first_construction() {
        let c = Coordinate::new(10.0, 20.0);
        assert_eq!(c.lat(), 10.0);
        assert_eq!(c.lon(), 20.0);
        assert_eq!(c.inner().x(), 20.0);
        assert_eq!(c.inner().y(), 10.0);
    }

    #[test]
    fn test_geo_point_conversion() {
        let point = geo::Point::new(-122.03118, 37.33182);
        let c = Coordinate::from(point);
        assert_eq!(c.lat(), 37.33182);
        let back: geo::Point<f64> = c.into();
        assert_eq!(back, point);
    }

    #[test]
    fn test_exact_equality_and_hashing() {
        let mut set = HashSet::new();
        set.insert(Coordinate::new(1.0, 2.0));
        set.insert(Coordinate::new(1.0, 2.0));
        set.insert(Coordinate::new(1.0, 2.000_000_1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(Coordinate::new(1.0, 2.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 2.0).is_finite());
        assert!(!Coordinate::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_serializes_as_point() {
        let json = serde_json::to_string(&Coordinate::new(10.0, 20.0)).unwrap();
        assert_eq!(json, r#"{"x":20.0,"y":10.0}"#);
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = Coordinate::new(37.3276574, -122.0350399);
        let json = serde_json::to_string(&c).unwrap();
        let parsed: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }
}
