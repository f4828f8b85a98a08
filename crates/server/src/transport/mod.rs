//! Blocking TCP transport: a listening socket and per-client connections.

mod connection;
mod listener;

pub use connection::{Connection, DEFAULT_MAX_LINE_BYTES};
pub use listener::{LISTEN_BACKLOG, Listener};

#[cfg(test)]
pub(crate) use connection::tests::MockStream;
