//! Dispatches framed requests against the spatial index.

use crate::protocol::{INVALID_GET, INVALID_POST, INVALID_REQUEST, Method, Request, Response, SUCCESS};
use parkspot::{Coordinate, SpatialIndex};
use parkspot::codec::{self, Verb};
use tracing::{debug, info, warn};

/// Owns the current index version and applies one request at a time.
///
/// Mutations are all-or-nothing: the new version replaces the current one
/// only after the whole payload decoded.
#[derive(Debug, Default)]
pub struct Handler {
    index: SpatialIndex,
}

impl Handler {
    pub fn new(index: SpatialIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn handle(&mut self, request: &Request) -> Response {
        match request.method {
            Method::Get => self.get(&request.payload),
            Method::Post => self.post(&request.payload),
            Method::Invalid => {
                debug!("rejecting request with unsupported method");
                Response::ok(INVALID_REQUEST)
            }
        }
    }

    fn get(&self, payload: &str) -> Response {
        let rect = match codec::decode_query(payload) {
            Ok(rect) => rect,
            Err(e) => {
                debug!("bad GET payload {:?}: {}", payload, e);
                return Response::ok(INVALID_GET);
            }
        };
        let found = self.index.query(&rect);
        debug!(matches = found.len(), "query");
        Response::ok(codec::encode_coordinate_list(
            found.into_iter().map(|spot| spot.coordinate()),
        ))
    }

    fn post(&mut self, payload: &str) -> Response {
        let command = codec::decode_post_command(payload);
        let apply: fn(&SpatialIndex, &[Coordinate]) -> SpatialIndex = match &command.verb {
            Verb::Add => SpatialIndex::insert_all,
            Verb::Remove => SpatialIndex::remove_near_all,
            Verb::Unknown(verb) => {
                warn!("ignoring unknown POST verb {:?}", verb);
                return Response::ok(SUCCESS);
            }
        };

        let coordinates = match command.coordinates() {
            Ok(coordinates) => coordinates,
            Err(e) => {
                debug!("bad POST payload {:?}: {}", payload, e);
                return Response::ok(INVALID_POST);
            }
        };

        self.index = apply(&self.index, &coordinates);
        info!(
            verb = %command.verb,
            count = coordinates.len(),
            total = self.index.len(),
            "applied"
        );
        Response::ok(SUCCESS)
    }
}
