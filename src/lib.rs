//! In-memory spatial index for parking spots built from two persistent AVL trees.
//!
//! ```rust
//! use parkspot::{Coordinate, IndexConfig, QueryRect, SpatialIndex};
//!
//! let index = SpatialIndex::new(IndexConfig::default())
//!     .insert(Coordinate::new(37.33182, -122.03118))
//!     .insert(Coordinate::new(37.3276574, -122.0350399));
//!
//! let area = QueryRect::new(
//!     Coordinate::new(37.34, -122.04),
//!     Coordinate::new(37.32, -122.02),
//! );
//! assert_eq!(index.query(&area).len(), 2);
//!
//! // Earlier versions are never modified.
//! let emptied = index.remove_near(Coordinate::new(37.33182, -122.03118), 0.0001);
//! assert_eq!(index.len(), 2);
//! assert_eq!(emptied.len(), 1);
//! # Ok::<(), parkspot::ParkspotError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod index;
pub mod tolerance;
pub mod tree;

pub use config::IndexConfig;
pub use error::{ParkspotError, Result};
pub use index::SpatialIndex;
pub use tolerance::{Keyed, Tolerance};
pub use tree::Node;

pub use parkspot_types::{Axis, Coordinate, QueryRect, Spot};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
