//! Parkspot Client
//!
//! Blocking client for the parkspot server. Each call opens one TCP
//! connection, sends a single request and reads the response until the server
//! closes the socket.
//!
//! # Example
//!
//! ```no_run
//! use parkspot::Coordinate;
//! use parkspot_client::ParkingClient;
//!
//! let client = ParkingClient::new("127.0.0.1:8080".parse().unwrap());
//! client.add(&[Coordinate::new(10.0, 20.0)])?;
//! let spots = client.query(Coordinate::new(11.0, 19.0), Coordinate::new(9.0, 21.0))?;
//! # Ok::<(), parkspot_client::ClientError>(())
//! ```

mod client;

pub use client::{ClientError, ParkingClient, Result};
