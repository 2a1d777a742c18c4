//! TCP listener implementation.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Hand out a fresh connection ID per accepted socket
//!
//! There is deliberately no connection limit: every accepted socket gets its
//! own worker, and a flood of clients is bounded only by the OS.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};

use crate::net::connection::ConnectionId;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(std::io::Error),
    /// Failed to accept connection.
    #[error("Failed to accept: {0}")]
    Accept(std::io::Error),
}

/// An unbounded TCP listener.
pub struct Listener {
    inner: TcpListener,
    next_id: u64,
}

impl Listener {
    /// Bind to `bind_address` (an `ip:port` string).
    pub async fn bind(bind_address: &str) -> Result<Self, ListenerError> {
        let addr: SocketAddr = bind_address.parse().map_err(|e| {
            ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(address = %local_addr, "Listener bound");

        Ok(Self::from_tokio(listener))
    }

    /// Wrap an already-bound Tokio listener.
    pub fn from_tokio(inner: TcpListener) -> Self {
        Self { inner, next_id: 1 }
    }

    /// Accept the next connection and assign it an ID.
    pub async fn accept(&mut self) -> Result<(TcpStream, SocketAddr, ConnectionId), ListenerError> {
        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        let id = ConnectionId::from(self.next_id);
        self.next_id += 1;

        tracing::debug!(peer_addr = %addr, connection_id = %id, "Connection accepted");

        Ok((stream, addr, id))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}
