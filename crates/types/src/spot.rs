//! Spots: coordinates keyed on one axis.

use crate::coord::Coordinate;
use serde::{Deserialize, Serialize};

/// The coordinate component a tree is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Project a coordinate onto this axis.
    #[inline]
    pub fn project(self, coordinate: &Coordinate) -> f64 {
        match self {
            Axis::Latitude => coordinate.lat(),
            Axis::Longitude => coordinate.lon(),
        }
    }
}

/// A stored point together with the axis its key is taken from.
///
/// Immutable once constructed. Equality and hashing are exact (coordinate bits
/// plus axis); approximate comparison lives with the index tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spot {
    coordinate: Coordinate,
    axis: Axis,
}

impl Spot {
    pub fn new(coordinate: Coordinate, axis: Axis) -> Self {
        Self { coordinate, axis }
    }

    pub fn latitude(coordinate: Coordinate) -> Self {
        Self::new(coordinate, Axis::Latitude)
    }

    pub fn longitude(coordinate: Coordinate) -> Self {
        Self::new(coordinate, Axis::Longitude)
    }

    /// The ordering key: latitude or longitude depending on the axis.
    #[inline]
    pub fn key(&self) -> f64 {
        self.axis.project(&self.coordinate)
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The same point keyed on another axis.
    pub fn project(&self, axis: Axis) -> Self {
        Self::new(self.coordinate, axis)
    }
}
