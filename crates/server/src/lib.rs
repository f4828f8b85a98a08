//! Parkspot Server
//!
//! Blocking, single-connection server exposing a [`parkspot::SpatialIndex`]
//! over an HTTP-shaped line protocol.
//!
//! # Protocol
//!
//! - `GET /<lat1>,<lon1>,<lat2>,<lon2>` returns the spots in the rectangle as
//!   `lat,lon,lat,lon,...`
//! - `POST /ADD,<lat>,<lon>[,...]` inserts spots
//! - `POST /REMOVE,<lat>,<lon>[,...]` removes spots near each coordinate
//!
//! Every response is `HTTP/1.1 200 OK`; failures are reported in the body.
//!
//! # Example
//!
//! ```no_run
//! use parkspot_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(8080).with_demo_spots(true);
//! let server = Server::bind(&config)?;
//! server.run();
//! # Ok::<(), parkspot_server::ServerError>(())
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod server;
pub mod transport;

pub use config::{DEMO_SPOTS, ServerConfig};
pub use error::{Result, ServerError};
pub use handler::Handler;
pub use protocol::{Method, Request, Response};
pub use server::Server;
