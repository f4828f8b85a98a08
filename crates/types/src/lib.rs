//! # parkspot-types
//!
//! Value types shared by the parkspot index, server and client.
//!
//! - **Coordinates**: [`Coordinate`], a latitude/longitude pair backed by `geo::Point`
//! - **Spots**: [`Spot`], a coordinate projected onto one [`Axis`] for ordering
//! - **Query rectangles**: [`QueryRect`], two opposite corners of a search area
//!
//! ## Examples
//!
//! ```rust
//! use parkspot_types::{Axis, Coordinate, QueryRect, Spot};
//!
//! let infinite_loop = Coordinate::new(37.33182, -122.03118);
//! let spot = Spot::new(infinite_loop, Axis::Latitude);
//! assert_eq!(spot.key(), 37.33182);
//!
//! let rect = QueryRect::new(Coordinate::new(37.34, -122.04), Coordinate::new(37.32, -122.02));
//! assert!(rect.contains(&infinite_loop));
//! ```

pub mod bbox;
pub mod coord;
pub mod spot;

pub use bbox::QueryRect;
pub use coord::Coordinate;
pub use spot::{Axis, Spot};
