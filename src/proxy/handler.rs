//! Per-connection request handling.
//!
//! `Dispatcher::handle_connection` is the single entry point a worker runs.
//! Any admission control added later wraps this call; nothing inside it needs
//! to change.

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ProxyConfig;
use crate::error::RelayError;
use crate::net::{ConnectionId, ConnectionLifecycle, ConnectionState};
use crate::proxy::request::{read_request_line, IncomingRequest};
use crate::relay::{reply, HttpRelay};
use crate::routing::{Route, RouteMatch, Router};

/// How a connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The client closed before sending a request line.
    NoRequest,
    /// The request line had fewer than two tokens.
    Malformed,
    /// Upstream response fully relayed.
    Relayed { bytes: u64 },
    /// FTP acknowledgement sent.
    FtpReplied,
    /// Unsupported-protocol reply sent.
    Unsupported,
    /// The connection ended on an I/O or target error.
    Failed,
}

/// Immutable per-server state handed to every worker.
#[derive(Debug)]
pub struct Dispatcher {
    router: Router,
    http: HttpRelay,
}

impl Dispatcher {
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            router: Router::standard(),
            http: HttpRelay::new(&config.relay),
        }
    }

    /// Serve one client connection start to finish, then close it.
    pub async fn handle_connection<S>(&self, stream: S, id: ConnectionId) -> Outcome
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut lifecycle = ConnectionLifecycle::new(id);
        let mut stream = BufReader::new(stream);

        let outcome = self.dispatch(&mut stream, &mut lifecycle).await;

        if let Err(e) = stream.get_mut().shutdown().await {
            tracing::trace!(error = %e, "Client shutdown failed");
        }
        lifecycle.transition(ConnectionState::Closed);

        tracing::debug!(?outcome, "Connection finished");
        outcome
    }

    async fn dispatch<S>(&self, stream: &mut BufReader<S>, lifecycle: &mut ConnectionLifecycle) -> Outcome
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let line = match read_request_line(stream).await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::debug!("Client closed without sending a request");
                return Outcome::NoRequest;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read request line");
                return Outcome::Failed;
            }
        };

        lifecycle.transition(ConnectionState::Classified);

        let request = match IncomingRequest::parse(&line) {
            Ok(request) => request,
            Err(e) => {
                lifecycle.transition(ConnectionState::MalformedReply);
                tracing::warn!(error = %e, "Rejecting request");
                return finish(reply::send(stream, reply::MALFORMED_REQUEST).await, Outcome::Malformed);
            }
        };

        tracing::info!(method = %request.method(), url = %request.target(), "Request received");

        match self.router.lookup(request.target()) {
            RouteMatch::Matched(Route::HttpRelay) => {
                lifecycle.transition(ConnectionState::RelayingHttp);
                match self.http.handle(request.target(), stream).await {
                    Ok(bytes) => Outcome::Relayed { bytes },
                    Err(e) => {
                        tracing::warn!(error = %e, url = %request.target(), "HTTP relay failed");
                        Outcome::Failed
                    }
                }
            }
            RouteMatch::Matched(Route::FtpStub) => {
                lifecycle.transition(ConnectionState::FtpReply);
                finish(reply::ftp_stub(stream, request.target()).await, Outcome::FtpReplied)
            }
            RouteMatch::NoMatch => {
                lifecycle.transition(ConnectionState::UnsupportedReply);
                tracing::debug!(url = %request.target(), "Unsupported URL protocol");
                finish(reply::send(stream, reply::UNSUPPORTED_PROTOCOL).await, Outcome::Unsupported)
            }
        }
    }
}

fn finish(result: Result<(), RelayError>, outcome: Outcome) -> Outcome {
    match result {
        Ok(()) => outcome,
        Err(e) => {
            tracing::debug!(error = %e, "Client went away before the reply was written");
            Outcome::Failed
        }
    }
}
