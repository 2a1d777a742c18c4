//! Forward proxy subsystem.
//!
//! # Data Flow
//! ```text
//! server.rs   (accept loop, one task per connection)
//!     → handler.rs  (read request line, classify, dispatch)
//!     → request.rs  (line reading and token split)
//!     → routing::Router → relay::{http, reply}
//! ```

pub mod handler;
pub mod request;
pub mod server;

pub use handler::{Dispatcher, Outcome};
pub use request::IncomingRequest;
pub use server::ProxyServer;
