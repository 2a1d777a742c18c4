//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (accepts, requests, relay results, failures)
//!     → a `connection` span per worker (connection_id, peer_addr)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, compact or JSON)
//! ```

pub mod logging;

pub use logging::init_tracing;
