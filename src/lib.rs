//! Minimal forward relay library.
//!
//! A client sends one request line; the target's scheme decides the answer:
//! an HTTP GET relayed to the origin byte for byte, a canned FTP
//! acknowledgement, or an unsupported-protocol reply. The crate also carries
//! the origin file server and test client used alongside the proxy.

// Core subsystems
pub mod net;
pub mod proxy;
pub mod relay;
pub mod routing;

// Companion tools
pub mod client;
pub mod origin;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use error::{ProxyError, RelayError};
pub use lifecycle::Shutdown;
pub use proxy::ProxyServer;
