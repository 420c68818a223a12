//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → net/connection.rs (frame and parse exactly one request)
//!     → server.rs (route lookup, handler call)
//!     → response.rs (status, headers, body chunks)
//!     → single vectored write, then close
//! ```

pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use headers::HeaderMap;
pub use request::Request;
pub use response::Response;
pub use server::{DispatchError, HttpServer};
