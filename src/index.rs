//! Dual-tree spatial index.
//!
//! Stored coordinates live in two persistent trees: one keyed on latitude and
//! one keyed on longitude. A rectangle query runs a range query on each tree and
//! keeps the longitude hits whose latitude matches one of the latitude hits.
//!
//! The intersection is one-directional and approximate: membership in the
//! latitude band is decided with the query tolerance, so the result can differ
//! from an exact rectangle test near the edges (see [`QueryRect::contains`]).

use crate::config::IndexConfig;
use crate::tolerance::Tolerance;
use crate::tree::Node;
use parkspot_types::{Axis, Coordinate, QueryRect, Spot};
use rustc_hash::FxHashSet;

/// An immutable version of the index. Mutations return a new version.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    by_latitude: Node<Spot>,
    by_longitude: Node<Spot>,
    config: IndexConfig,
}

impl SpatialIndex {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            by_latitude: Node::Empty,
            by_longitude: Node::Empty,
            config,
        }
    }

    /// Build an index pre-populated with `coordinates`.
    pub fn with_spots<I>(config: IndexConfig, coordinates: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        coordinates
            .into_iter()
            .fold(Self::new(config), |index, coordinate| index.insert(coordinate))
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn by_latitude(&self) -> &Node<Spot> {
        &self.by_latitude
    }

    pub fn by_longitude(&self) -> &Node<Spot> {
        &self.by_longitude
    }

    /// Number of spots in the latitude tree.
    pub fn len(&self) -> usize {
        self.by_latitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_latitude.is_empty()
    }

    /// All stored coordinates in latitude order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.by_latitude.iter().map(Spot::coordinate)
    }

    /// Spots inside `rect`, keyed on longitude.
    pub fn query(&self, rect: &QueryRect) -> FxHashSet<Spot> {
        let tolerance = self.config.query();

        let (lat_lo, lat_hi) = rect.latitude_bounds();
        let by_lat = self
            .by_latitude
            .range_query(lat_lo, lat_hi, tolerance, |_| true);

        let mut lat_keys: Vec<f64> = by_lat.iter().map(Spot::key).collect();
        lat_keys.sort_by(f64::total_cmp);

        let (lon_lo, lon_hi) = rect.longitude_bounds();
        self.by_longitude
            .range_query(lon_lo, lon_hi, tolerance, |spot| {
                let counterpart = spot.project(Axis::Latitude);
                by_lat.contains(&counterpart)
                    || has_match(&lat_keys, counterpart.key(), tolerance)
            })
    }

    /// Coordinates inside `rect`, in no particular order.
    pub fn query_coordinates(&self, rect: &QueryRect) -> Vec<Coordinate> {
        self.query(rect).into_iter().map(|spot| spot.coordinate()).collect()
    }

    /// Add a coordinate to both trees.
    pub fn insert(&self, coordinate: Coordinate) -> Self {
        if !coordinate.is_finite() {
            log::warn!("refusing to index non-finite coordinate {}", coordinate);
            return self.clone();
        }

        Self {
            by_latitude: self.by_latitude.insert(Spot::latitude(coordinate)),
            by_longitude: self.by_longitude.insert(Spot::longitude(coordinate)),
            config: self.config,
        }
    }

    pub fn insert_all(&self, coordinates: &[Coordinate]) -> Self {
        coordinates
            .iter()
            .fold(self.clone(), |index, coordinate| index.insert(*coordinate))
    }

    /// Remove from each tree every spot whose key lies within `radius` of the
    /// matching component of `coordinate`.
    pub fn remove_near(&self, coordinate: Coordinate, radius: f64) -> Self {
        self.remove_matching(coordinate, Tolerance::new(radius))
    }

    /// `remove_near` for each coordinate, using the configured removal radius.
    pub fn remove_near_all(&self, coordinates: &[Coordinate]) -> Self {
        let tolerance = self.config.removal();
        coordinates
            .iter()
            .fold(self.clone(), |index, coordinate| {
                index.remove_matching(*coordinate, tolerance)
            })
    }

    fn remove_matching(&self, coordinate: Coordinate, tolerance: Tolerance) -> Self {
        let by_latitude = self
            .by_latitude
            .remove(&Spot::latitude(coordinate), tolerance);
        let by_longitude = self
            .by_longitude
            .remove(&Spot::longitude(coordinate), tolerance);

        if by_latitude.ptr_eq(&self.by_latitude) && by_longitude.ptr_eq(&self.by_longitude) {
            log::debug!("no spot within {} of {}", tolerance.epsilon(), coordinate);
        }

        Self {
            by_latitude,
            by_longitude,
            config: self.config,
        }
    }
}

/// `sorted` holds a key strictly within the tolerance of `key`.
fn has_match(sorted: &[f64], key: f64, tolerance: Tolerance) -> bool {
    let epsilon = tolerance.epsilon();
    let first_above = sorted.partition_point(|k| *k <= key - epsilon);
    sorted
        .get(first_above)
        .is_some_and(|k| *k < key + epsilon)
}
