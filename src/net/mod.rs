//! Network subsystem.
//!
//! # Data Flow
//! ```text
//! Bind (listener.rs, SO_REUSEADDR)
//!     → accept loop (one pending accept, re-armed after each completion)
//!     → connection.rs (frame + parse exactly one request per socket)
//!     → http/server.rs takes over for dispatch
//! ```

pub mod connection;
pub mod listener;

pub use connection::{Connection, ParseError};
pub use listener::{Listener, ListenerError};
