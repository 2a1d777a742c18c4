//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection IDs)
//!     → connection.rs (state machine)
//!     → Hand off to proxy::handler
//! ```
//!
//! # Design Decisions
//! - No accept queue bound and no admission control
//! - Each worker owns its socket; nothing is shared between workers

pub mod connection;
pub mod listener;

pub use connection::{ConnectionId, ConnectionLifecycle, ConnectionState};
pub use listener::{Listener, ListenerError};
