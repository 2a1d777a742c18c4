//! Error types for the relay and its binaries.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::net::ListenerError;

/// Failures that end a single client connection.
///
/// None of these escape the worker that hit them.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request line had fewer than two space-separated tokens.
    #[error("malformed request line: {line:?}")]
    MalformedRequestLine { line: String },

    /// The target could not be parsed as a URL with a host.
    #[error("invalid target {target:?}: {reason}")]
    InvalidTarget { target: String, reason: String },

    /// Opening the upstream connection failed.
    #[error("failed to connect to upstream {addr}: {source}")]
    UpstreamConnect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Writing the request to, or reading the response from, upstream failed.
    #[error("upstream I/O error: {0}")]
    UpstreamIo(#[source] io::Error),

    /// Reading from or writing to the client failed.
    #[error("client I/O error: {0}")]
    ClientIo(#[source] io::Error),
}

impl RelayError {
    /// Whether the client should still be sent the HTTP error line.
    ///
    /// A client that can no longer be written to gets nothing.
    pub fn notifies_client(&self) -> bool {
        !matches!(self, RelayError::ClientIo(_))
    }
}

pub type RelayResult<T> = Result<T, RelayError>;

/// Startup failures surfaced by the binaries.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
