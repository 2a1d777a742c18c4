//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (binaries):
//!     Parse CLI → Load config → Init tracing → Bind listener → Accept loop
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl-C → Stop accepting → Exit (in-flight workers are not drained)
//! ```
//!
//! # Design Decisions
//! - Fail fast: a bind failure at startup is fatal

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
