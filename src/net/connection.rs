//! Per-connection identity and state machine.
//!
//! # Responsibilities
//! - Identify a connection in traces (`conn-N`)
//! - Track the one-shot state progression of a worker
//!
//! ```text
//! AwaitRequestLine → Classified → RelayingHttp | FtpReply | UnsupportedReply | MalformedReply → Closed
//! ```
//!
//! `Closed` is reachable from every state, including on error.

use std::fmt;

/// Unique identifier for a connection, assigned by the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ConnectionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Connection state for lifecycle tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Waiting for the client's request line.
    AwaitRequestLine,
    /// Request line read and classified.
    Classified,
    /// Copying upstream bytes to the client.
    RelayingHttp,
    /// Writing the canned FTP acknowledgement.
    FtpReply,
    /// Writing the unsupported-protocol reply.
    UnsupportedReply,
    /// Writing the malformed-request reply.
    MalformedReply,
    /// Connection is closed. Terminal.
    Closed,
}

impl ConnectionState {
    /// Whether moving from `self` to `next` is a legal one-shot transition.
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;
        match (self, next) {
            (Closed, _) => false,
            (_, Closed) => true,
            (AwaitRequestLine, Classified) => true,
            (Classified, RelayingHttp | FtpReply | UnsupportedReply | MalformedReply) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::AwaitRequestLine => "await_request_line",
            ConnectionState::Classified => "classified",
            ConnectionState::RelayingHttp => "relaying_http",
            ConnectionState::FtpReply => "ftp_reply",
            ConnectionState::UnsupportedReply => "unsupported_reply",
            ConnectionState::MalformedReply => "malformed_reply",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Tracks the state of one worker's connection.
#[derive(Debug)]
pub struct ConnectionLifecycle {
    id: ConnectionId,
    state: ConnectionState,
}

impl ConnectionLifecycle {
    /// Start tracking a freshly accepted connection.
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            state: ConnectionState::AwaitRequestLine,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Move to `next`. Illegal transitions are traced and ignored.
    pub fn transition(&mut self, next: ConnectionState) {
        if !self.state.can_transition_to(next) {
            tracing::warn!(
                connection_id = %self.id,
                from = %self.state,
                to = %next,
                "Ignoring illegal connection state transition"
            );
            return;
        }
        tracing::trace!(connection_id = %self.id, from = %self.state, to = %next, "Connection state");
        self.state = next;
    }
}

impl Drop for ConnectionLifecycle {
    fn drop(&mut self) {
        if self.state != ConnectionState::Closed {
            self.transition(ConnectionState::Closed);
        }
    }
}
