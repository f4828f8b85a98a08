//! The accept loop.
//!
//! One connection is served at a time: read the header block, dispatch, write
//! the response, close. Per-connection failures are logged and never stop the
//! loop.

use crate::config::ServerConfig;
use crate::error::Result;
use crate::handler::Handler;
use crate::protocol::Request;
use crate::transport::{Connection, Listener};
use std::io::{Read, Write};
use std::net::SocketAddr;
use tracing::{debug, info, warn};

pub struct Server {
    listener: Listener,
    handler: Handler,
    max_line_bytes: usize,
}

impl Server {
    /// Validate `config`, build the starting index and bind the socket.
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let handler = Handler::new(config.initial_index());
        info!(spots = handler.index().len(), "index ready");
        let listener = Listener::bind(&config.host, config.port)?;
        Ok(Self {
            listener,
            handler,
            max_line_bytes: config.max_line_bytes,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept and serve a single connection.
    pub fn serve_next(&mut self) {
        if let Some(conn) = self.listener.accept() {
            let mut conn = conn.with_max_line_bytes(self.max_line_bytes);
            serve_connection(&mut self.handler, &mut conn);
        }
    }

    pub fn run(mut self) -> ! {
        loop {
            self.serve_next();
        }
    }
}

/// Run one request/response exchange over `conn`.
pub fn serve_connection<S: Read + Write>(handler: &mut Handler, conn: &mut Connection<S>) {
    let peer = conn.peer_address();
    if peer.is_none() {
        debug!("serving client with unknown address");
    }

    let lines = conn.read_request_lines();
    let request = Request::parse(&lines);
    debug!(?peer, method = %request.method, payload = %request.payload, "request");

    let response = handler.handle(&request);
    if let Err(e) = conn.write_all(&response.to_bytes()) {
        warn!(?peer, "write failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockStream;

    fn exchange(handler: &mut Handler, raw: &str) -> String {
        let mut conn = Connection::new(MockStream::new(raw), None);
        serve_connection(handler, &mut conn);
        String::from_utf8(conn.into_inner().output).unwrap()
    }

    #[test]
    fn test_exchange_over_mock_stream() {
        let mut handler = Handler::default();
        assert_eq!(
            exchange(&mut handler, "POST /ADD,10.0,20.0 HTTP/1.1\r\nHost: x\r\n\r\n"),
            "HTTP/1.1 200 OK\r\n\r\nSuccess"
        );
        assert_eq!(
            exchange(&mut handler, "GET /11,19,9,21 HTTP/1.1\r\n\r\n"),
            "HTTP/1.1 200 OK\r\n\r\n10.0,20.0"
        );
    }

    #[test]
    fn test_serve_connection_mutates_handler() {
        let mut handler = Handler::default();
        let mut conn = Connection::new(MockStream::new("POST /ADD,1.0,2.0 HTTP/1.1\r\n\r\n"), None);
        serve_connection(&mut handler, &mut conn);
        assert_eq!(handler.index().len(), 1);
    }

    #[test]
    fn test_bind_rejects_invalid_config() {
        let config = ServerConfig::default().with_host("");
        assert!(Server::bind(&config).is_err());
    }
}
