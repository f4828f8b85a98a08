//! One accepted client connection.
//!
//! Provides line-oriented reads and full-buffer writes over any
//! `Read + Write` stream. A connection carries exactly one request and one
//! response; the socket is closed when the value is dropped.

use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use tracing::{debug, warn};

/// Default cap on a single line, in bytes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 8192;

pub struct Connection<S> {
    stream: BufReader<S>,
    peer: Option<SocketAddr>,
    max_line_bytes: usize,
}

impl Connection<TcpStream> {
    /// Wrap an accepted socket, resolving its peer address for logging.
    pub fn from_tcp(stream: TcpStream) -> Self {
        let peer = match stream.peer_addr() {
            Ok(addr) => Some(addr),
            Err(e) => {
                debug!("could not resolve peer address: {}", e);
                None
            }
        };
        Self::new(stream, peer)
    }
}

impl<S: Read + Write> Connection<S> {
    pub fn new(stream: S, peer: Option<SocketAddr>) -> Self {
        Self {
            stream: BufReader::new(stream),
            peer,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Remote address, if it could be resolved.
    pub fn peer_address(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Next line including its `\n`, or `None` at end of stream.
    ///
    /// A line longer than the configured cap is returned truncated and without
    /// a terminator. Read errors are logged and reported as end of stream.
    pub fn read_line(&mut self) -> Option<String> {
        let mut buf = Vec::new();
        let limit = self.max_line_bytes as u64;
        match (&mut self.stream).take(limit).read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8_lossy(&buf).into_owned()),
            Err(e) => {
                warn!(peer = ?self.peer, "read failed: {}", e);
                None
            }
        }
    }

    /// Lines up to (not including) the blank line that ends a header block.
    ///
    /// Stops early at end of stream or at an unterminated (over-long) line. In
    /// the latter case the rest of the header block is read and discarded, so
    /// no request bytes are left unread when the socket closes.
    pub fn read_request_lines(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line() {
            if is_blank(&line) {
                return lines;
            }
            let terminated = line.ends_with('\n');
            lines.push(line);
            if !terminated {
                warn!(
                    peer = ?self.peer,
                    "line exceeds {} bytes or stream ended mid-line",
                    self.max_line_bytes
                );
                self.skip_header_block();
                break;
            }
        }
        lines
    }

    /// Discard input through the end of the current header block.
    fn skip_header_block(&mut self) {
        // Only `\r` seen since the last line end; false for the truncated line.
        let mut blank = false;
        loop {
            let buf = match self.stream.fill_buf() {
                Ok(buf) => buf,
                Err(e) => {
                    debug!(peer = ?self.peer, "read failed while draining: {}", e);
                    return;
                }
            };
            if buf.is_empty() {
                return;
            }
            match buf.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    let ends_block = blank && buf[..end].iter().all(|&b| b == b'\r');
                    self.stream.consume(end + 1);
                    if ends_block {
                        return;
                    }
                    blank = true;
                }
                None => {
                    let n = buf.len();
                    blank = blank && buf.iter().all(|&b| b == b'\r');
                    self.stream.consume(n);
                }
            }
        }
    }

    /// Write the whole buffer, retrying partial writes, then flush.
    pub fn write_all(&mut self, mut bytes: &[u8]) -> io::Result<()> {
        let stream = self.stream.get_mut();
        while !bytes.is_empty() {
            match stream.write(bytes) {
                Ok(0) => {
                    return Err(io::Error::new(
                        ErrorKind::WriteZero,
                        "peer stopped accepting data",
                    ));
                }
                Ok(n) => bytes = &bytes[n..],
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        stream.flush()
    }

    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}

fn is_blank(line: &str) -> bool {
    line == "\r\n" || line == "\n"
}
