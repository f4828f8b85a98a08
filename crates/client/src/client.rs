use parkspot::codec::{self, Verb};
use parkspot::{Coordinate, ParkspotError, QueryRect};
use parkspot_server::protocol::{INVALID_GET, INVALID_POST, INVALID_REQUEST, SUCCESS};
use parkspot_server::{Method, Request, Response};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),
    #[error("Malformed response: {0:?}")]
    MalformedResponse(String),
    #[error("Server rejected request: {0}")]
    Rejected(String),
    #[error("Decode error: {0}")]
    Decode(#[from] ParkspotError),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ParkingClient {
    addr: SocketAddr,
    timeout: Option<Duration>,
}

impl ParkingClient {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            timeout: Some(Duration::from_secs(5)),
        }
    }

    /// Read/write timeout per call; `None` blocks indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Spots inside the rectangle spanned by the two corners. Order is
    /// unspecified.
    pub fn query(&self, top_left: Coordinate, bottom_right: Coordinate) -> Result<Vec<Coordinate>> {
        let payload = codec::encode_query(&QueryRect::new(top_left, bottom_right));
        let body = self.send(Method::Get, &payload)?;
        if body == INVALID_GET || body == INVALID_REQUEST {
            return Err(ClientError::Rejected(body));
        }
        Ok(codec::decode_coordinate_list(&body)?)
    }

    pub fn add(&self, spots: &[Coordinate]) -> Result<()> {
        self.post(Verb::Add, spots)
    }

    /// Remove stored spots near each coordinate. Removing a spot that is not
    /// stored still succeeds.
    pub fn remove(&self, spots: &[Coordinate]) -> Result<()> {
        self.post(Verb::Remove, spots)
    }

    fn post(&self, verb: Verb, spots: &[Coordinate]) -> Result<()> {
        let body = self.send(Method::Post, &codec::encode_post(&verb, spots))?;
        match body.as_str() {
            SUCCESS => Ok(()),
            INVALID_POST | INVALID_REQUEST => Err(ClientError::Rejected(body)),
            _ => Err(ClientError::MalformedResponse(body)),
        }
    }

    /// Send one raw request and return the response body, whatever it says.
    pub fn send(&self, method: Method, payload: &str) -> Result<String> {
        let mut stream = TcpStream::connect(self.addr)?;
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;

        debug!(addr = %self.addr, %method, payload, "sending request");
        stream.write_all(Request::to_wire(method, payload).as_bytes())?;
        stream.flush()?;

        let mut raw = String::new();
        stream.read_to_string(&mut raw)?;
        let response = Response::parse(&raw).ok_or(ClientError::MalformedResponse(raw))?;
        Ok(response.body)
    }
}
