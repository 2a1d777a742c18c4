//! Origin file server subsystem.
//!
//! # Data Flow
//! ```text
//! server.rs  (accept loop, request line, status text)
//!     → resolve.rs (index fallback, root containment, file lookup)
//!     → mime_guess (Content-Type) → file bytes
//! ```

pub mod resolve;
pub mod server;

pub use resolve::{DocumentRoot, Resolution};
pub use server::OriginServer;
