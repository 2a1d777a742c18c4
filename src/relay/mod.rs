//! Relay subsystem: the three answers a classified request can get.
//!
//! # Data Flow
//! ```text
//! Route::HttpRelay → http.rs   (upstream connect, GET, byte passthrough)
//! Route::FtpStub   → reply.rs  (canned FTP acknowledgement)
//! NoMatch          → reply.rs  (unsupported-protocol text)
//! ```

pub mod http;
pub mod reply;
pub mod target;

pub use http::HttpRelay;
pub use target::TargetUrl;
