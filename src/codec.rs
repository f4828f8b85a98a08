//! Wire codec for coordinate lists and POST commands.
//!
//! Coordinates travel as a flat comma-separated list, `lat,long,lat,long,...`.
//! POST payloads prefix that list with a verb: `ADD,10.0,20.0`.

use crate::error::{ParkspotError, Result};
use parkspot_types::{Coordinate, QueryRect};
use std::fmt;

/// Parse `lat,long[,lat,long...]`.
///
/// Values at even positions are latitudes and values at odd positions are
/// longitudes. Any non-numeric or non-finite token fails the whole list, as
/// does a trailing latitude without a longitude. Empty input is an empty list.
pub fn decode_coordinate_list(text: &str) -> Result<Vec<Coordinate>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let values = text
        .split(',')
        .enumerate()
        .map(|(position, token)| parse_value(token, position))
        .collect::<Result<Vec<f64>>>()?;

    if values.len() % 2 != 0 {
        return Err(ParkspotError::UnpairedValue {
            count: values.len(),
        });
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| Coordinate::new(pair[0], pair[1]))
        .collect())
}

fn parse_value(token: &str, position: usize) -> Result<f64> {
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParkspotError::InvalidNumber {
            token: trimmed.to_string(),
            position,
        }),
    }
}

/// Join coordinates as `lat,long` pairs in iteration order.
///
/// Values use the shortest text that parses back to the same `f64`, always
/// with a decimal point (`10.0`, `-122.03118`).
pub fn encode_coordinate_list<I>(coordinates: I) -> String
where
    I: IntoIterator<Item = Coordinate>,
{
    coordinates
        .into_iter()
        .map(|c| format!("{:?},{:?}", c.lat(), c.lon()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a GET payload: exactly two corners.
pub fn decode_query(text: &str) -> Result<QueryRect> {
    match decode_coordinate_list(text)?.as_slice() {
        [top_left, bottom_right] => Ok(QueryRect::new(*top_left, *bottom_right)),
        other => Err(ParkspotError::CoordinateCount {
            expected: 2,
            found: other.len(),
        }),
    }
}

/// Build a GET payload for `rect`.
pub fn encode_query(rect: &QueryRect) -> String {
    encode_coordinate_list([rect.top_left, rect.bottom_right])
}

/// The mutation named by a POST payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Add,
    Remove,
    /// Anything else; carried through so it can be logged.
    Unknown(String),
}

impl Verb {
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "ADD" => Verb::Add,
            "REMOVE" => Verb::Remove,
            other => Verb::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Add => f.write_str("ADD"),
            Verb::Remove => f.write_str("REMOVE"),
            Verb::Unknown(verb) => f.write_str(verb),
        }
    }
}

/// A POST payload split into its verb and the undecoded coordinate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCommand<'a> {
    pub verb: Verb,
    pub payload: &'a str,
}

impl PostCommand<'_> {
    pub fn coordinates(&self) -> Result<Vec<Coordinate>> {
        decode_coordinate_list(self.payload)
    }
}

/// Split a POST payload on its first comma.
pub fn decode_post_command(text: &str) -> PostCommand<'_> {
    let (verb, payload) = text.split_once(',').unwrap_or((text, ""));
    PostCommand {
        verb: Verb::parse(verb),
        payload,
    }
}

/// Build a POST payload: `VERB,lat,long,...`.
pub fn encode_post(verb: &Verb, coordinates: &[Coordinate]) -> String {
    if coordinates.is_empty() {
        return verb.to_string();
    }
    format!(
        "{},{}",
        verb,
        encode_coordinate_list(coordinates.iter().copied())
    )
}
