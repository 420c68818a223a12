//! Handler-populated response.
//!
//! # Responsibilities
//! - Hold status code, headers, and ordered body chunks
//! - Map status codes to reason phrases
//! - Serialize the status line and header block for the wire
//!
//! # Design Decisions
//! - Body chunks are kept separate rather than concatenated; the dispatcher
//!   writes them as individual segments of one vectored write
//! - `Content-Length` is always computed by the dispatcher from the chunk
//!   byte sum; handler-supplied values are overwritten

use crate::http::headers::HeaderMap;

/// A response under construction by a handler.
///
/// Owned by the dispatcher from creation until the wire write completes;
/// handlers get a `&mut` borrow for the duration of their call only.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    chunks: Vec<Vec<u8>>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Create a response with status 200 and no headers or body.
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HeaderMap::new(),
            chunks: Vec::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Overwrite a header (see [`HeaderMap::set`]).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// Append a header without deduplication (see [`HeaderMap::add`]).
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.add(name, value);
    }

    /// Append one body chunk. Chunks are emitted back-to-back in append
    /// order, unmodified. Zero-length chunks are legal.
    pub fn append_chunk(&mut self, chunk: impl Into<Vec<u8>>) {
        self.chunks.push(chunk.into());
    }

    /// Body chunks in append order.
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// Total body length: the byte sum of every chunk.
    pub fn body_len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// The wire status line, `HTTP/1.1 <code> <reason>\r\n`.
    pub fn status_line(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\n",
            self.status,
            Self::reason_phrase(self.status)
        )
    }

    /// Reason phrase for a status code, with a generic fallback for codes
    /// outside the common set.
    pub fn reason_phrase(status: u16) -> &'static str {
        match status {
            100 => "Continue",
            101 => "Switching Protocols",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            206 => "Partial Content",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            411 => "Length Required",
            413 => "Payload Too Large",
            414 => "URI Too Long",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}
