//! Request and response framing.
//!
//! A request is the method and target from the first line plus any
//! `Name: value` headers that follow it. The leading character of the target
//! (normally `/`) is dropped to yield the command payload. Responses always
//! carry a `200 OK` status line; errors are reported in the body.

use std::collections::HashMap;
use std::fmt;

pub const STATUS_LINE: &str = "HTTP/1.1 200 OK";
pub const INVALID_REQUEST: &str = "Invalid request";
pub const INVALID_GET: &str = "Invalid Get Request";
pub const INVALID_POST: &str = "Invalid Post Request";
pub const SUCCESS: &str = "Success";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Invalid,
}

impl Method {
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Invalid,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
            Method::Invalid => f.write_str("INVALID"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub payload: String,
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Frame the lines of one header block.
    ///
    /// An empty block, or a first line without a target, is an invalid request.
    pub fn parse(lines: &[String]) -> Self {
        let Some((first, rest)) = lines.split_first() else {
            return Self::invalid();
        };

        let mut tokens = first.split_whitespace();
        let method = tokens.next().map(Method::parse).unwrap_or(Method::Invalid);
        let Some(target) = tokens.next() else {
            return Self::invalid();
        };
        if method == Method::Invalid {
            return Self::invalid();
        }

        let mut chars = target.chars();
        chars.next();
        let payload = chars.as_str().to_string();

        let headers = rest
            .iter()
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();

        Self {
            method,
            payload,
            headers,
        }
    }

    fn invalid() -> Self {
        Self {
            method: Method::Invalid,
            payload: String::new(),
            headers: HashMap::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Serialize as a header block, for clients.
    pub fn to_wire(method: Method, payload: &str) -> String {
        format!("{method} /{payload} HTTP/1.1\r\n\r\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("{STATUS_LINE}\r\n\r\n{}", self.body).into_bytes()
    }

    /// Split a raw response into its body. `None` if the status line or the
    /// blank line is missing.
    pub fn parse(raw: &str) -> Option<Self> {
        let (head, body) = raw.split_once("\r\n\r\n")?;
        let status = head.lines().next()?;
        if !status.starts_with("HTTP/1.1 200") {
            return None;
        }
        Some(Self::ok(body))
    }
}
