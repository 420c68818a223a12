//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (linear scan over compiled patterns)
//!     → Return: first matching Handler, or None
//!
//! Route Compilation (at startup):
//!     add_route(pattern, handler)
//!     → Anchor and compile regex (fails here, not at match time)
//!     → Append to table, order preserved
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable while serving
//! - First match wins (registration order, not specificity)
//! - Deterministic: same path always dispatches the same route

pub mod router;

pub use router::{Handler, RouteError, Router};
