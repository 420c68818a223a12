//! Parsed request value object.
//!
//! # Responsibilities
//! - Carry method, path, and headers of one parsed request
//! - Stay immutable from parse until the connection is torn down
//!
//! # Design Decisions
//! - Constructed only by the connection parser, never by handlers
//! - Request bodies are out of scope (one-shot GET-style serving)

use crate::http::headers::HeaderMap;

/// One parsed HTTP request. Read-only for handlers.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    headers: HeaderMap,
}

impl Request {
    pub(crate) fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        headers: HeaderMap,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers,
        }
    }

    /// Request method as sent by the client (e.g. `GET`).
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request target path, including any query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request headers, case-insensitive for lookup.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
