//! Per-socket connection lifecycle: framing and request parsing.
//!
//! # Responsibilities
//! - Own exactly one accepted socket and its read buffer
//! - Read until the header-block terminator, then parse the request
//! - Deliver exactly one terminal event: a parsed [`Request`] or a
//!   [`ParseError`]
//! - Write the fully assembled response as one vectored write
//!
//! A connection serves one request and is then dropped; it is never reused.
//! Request bodies are not read: framing stops at the end of the header block.

use std::io::IoSlice;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::http::headers::HeaderMap;
use crate::http::request::Request;

/// Hard cap on the request head (request line + headers). Anything larger
/// is rejected before parsing.
const MAX_HEAD_BYTES: usize = 16 * 1024;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Error type for request framing and parsing. All variants are terminal
/// for the connection; no response is attempted after any of them.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Peer closed the socket before a complete request head arrived.
    #[error("connection closed before a complete request arrived")]
    UnexpectedEof,
    /// Request head exceeded [`MAX_HEAD_BYTES`].
    #[error("request head exceeds {MAX_HEAD_BYTES} bytes")]
    HeadTooLarge,
    /// Request head contained bytes that are not valid UTF-8.
    #[error("request head is not valid UTF-8")]
    BadEncoding,
    /// Request line was not `METHOD SP PATH SP VERSION`.
    #[error("malformed request line")]
    BadRequestLine,
    /// A header line had no `:` separator or an empty name.
    #[error("malformed header line")]
    BadHeader,
    /// Protocol version other than HTTP/1.0 or HTTP/1.1.
    #[error("unsupported protocol version {0:?}")]
    BadVersion(String),
    /// Transport-level read failure.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

/// One accepted socket plus its buffered, not-yet-parsed bytes.
pub struct Connection {
    stream: TcpStream,
    peer_addr: SocketAddr,
    buf: Vec<u8>,
}

impl Connection {
    pub fn new(stream: TcpStream, peer_addr: SocketAddr) -> Self {
        Self {
            stream,
            peer_addr,
            buf: Vec::new(),
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Read from the socket until a full request head is buffered, then
    /// parse it. Resolves exactly once per connection.
    pub async fn read_request(&mut self) -> Result<Request, ParseError> {
        loop {
            if let Some(head_len) = find_terminator(&self.buf) {
                return parse_head(&self.buf[..head_len]);
            }
            if self.buf.len() > MAX_HEAD_BYTES {
                return Err(ParseError::HeadTooLarge);
            }

            let mut chunk = [0u8; 4096];
            let n = self.stream.read(&mut chunk).await?;
            if n == 0 {
                return Err(ParseError::UnexpectedEof);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }

    /// Write every segment to the socket, retrying partial writes, and
    /// return the total number of bytes transferred. The caller compares
    /// that total against the expected response size.
    pub async fn write_vectored_all(
        &mut self,
        segments: &mut [IoSlice<'_>],
    ) -> Result<usize, std::io::Error> {
        let mut total = 0usize;
        let mut rest = segments;
        // advance_slices also discards leading zero-length segments, so a
        // write of 0 with segments remaining means the peer is gone.
        while !rest.is_empty() {
            let n = self.stream.write_vectored(rest).await?;
            total += n;
            IoSlice::advance_slices(&mut rest, n);
            if n == 0 && !rest.is_empty() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "connection closed during response write",
                ));
            }
        }
        self.stream.flush().await?;
        Ok(total)
    }
}

/// Length of the request head including its terminator, if fully buffered.
fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
        .map(|pos| pos + HEAD_TERMINATOR.len())
}

/// Parse a complete request head (request line + header lines).
fn parse_head(head: &[u8]) -> Result<Request, ParseError> {
    let text = std::str::from_utf8(head).map_err(|_| ParseError::BadEncoding)?;
    let text = text.trim_end_matches("\r\n");

    let mut lines = text.split("\r\n");
    let request_line = lines.next().ok_or(ParseError::BadRequestLine)?;
    let (method, path) = parse_request_line(request_line)?;

    let mut headers = HeaderMap::new();
    for line in lines {
        let (name, value) = line.split_once(':').ok_or(ParseError::BadHeader)?;
        if name.is_empty() || name.contains(' ') {
            return Err(ParseError::BadHeader);
        }
        headers.add(name, value.trim());
    }

    Ok(Request::new(method, path, headers))
}

fn parse_request_line(line: &str) -> Result<(&str, &str), ParseError> {
    let mut parts = line.split(' ');
    let method = parts.next().filter(|p| !p.is_empty());
    let path = parts.next().filter(|p| !p.is_empty());
    let version = parts.next();
    if parts.next().is_some() {
        return Err(ParseError::BadRequestLine);
    }
    match (method, path, version) {
        (Some(method), Some(path), Some(version)) => {
            if version != "HTTP/1.1" && version != "HTTP/1.0" {
                return Err(ParseError::BadVersion(version.to_string()));
            }
            Ok((method, path))
        }
        _ => Err(ParseError::BadRequestLine),
    }
}
