//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Raw request target ("http://host/path")
//!     → router.rs (ordered rule lookup)
//!     → matcher.rs (literal scheme prefix check)
//!     → Return: Matched(Route) or NoMatch
//! ```
//!
//! # Design Decisions
//! - Rules are fixed at construction, immutable at runtime
//! - Deterministic: same target always yields the same route
//! - NoMatch is answered with the unsupported-protocol reply by the caller

pub mod matcher;
pub mod router;

pub use router::{Route, RouteMatch, Router};
