//! Minimal single-process HTTP/1.1 server.
//!
//! One connection carries exactly one request and at most one response; the
//! socket is closed as soon as the response write completes. No keep-alive,
//! no pipelining, no chunked encoding, no TLS.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                   SERVER                     │
//!                    │                                              │
//!   Client Request   │  ┌─────────┐    ┌──────────┐    ┌─────────┐ │
//!   ─────────────────┼─▶│   net   │───▶│   http   │───▶│ routing │ │
//!                    │  │listener │    │  server  │    │  table  │ │
//!                    │  └─────────┘    └────┬─────┘    └────┬────┘ │
//!                    │                      │               │      │
//!                    │                      ▼               ▼      │
//!   Client Response  │  ┌─────────┐    ┌─────────────────────────┐ │
//!   ◀────────────────┼──│vectored │◀───│   handler(&Request,     │ │
//!                    │  │  write  │    │        &mut Response)   │ │
//!                    │  └─────────┘    └─────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Designed for a current-thread tokio runtime: every accepted connection is
//! driven by one spawned task that owns the connection, the parsed request,
//! and the response until the socket closes.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod routing;

pub use config::ServerConfig;
pub use http::{HeaderMap, HttpServer, Request, Response};
pub use routing::Router;
