//! Proxy accept loop.
//!
//! # Responsibilities
//! - Accept connections on the bound listener forever
//! - Spawn one worker task per connection, moving the socket into it
//! - Log accept failures and keep going
//! - Stop accepting when the shutdown signal fires
//!
//! # Design Decisions
//! - Unbounded concurrency: no semaphore, no queue
//! - In-flight workers are not drained; they run until their sockets close
//!   or the runtime is dropped

use std::sync::Arc;

use tracing::Instrument;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::lifecycle::ShutdownSignal;
use crate::net::Listener;
use crate::proxy::handler::Dispatcher;

/// The forward proxy server.
pub struct ProxyServer {
    dispatcher: Arc<Dispatcher>,
}

impl ProxyServer {
    /// Create a new server with the given configuration.
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(config)),
        }
    }

    /// Run the accept loop until `shutdown` fires or every handle to it is dropped.
    pub async fn run(
        self,
        mut listener: Listener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), ProxyError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Proxy server running");

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr, id)) => {
                        let dispatcher = Arc::clone(&self.dispatcher);
                        let span = tracing::info_span!("connection", connection_id = %id, peer_addr = %peer_addr);
                        tokio::spawn(
                            async move {
                                dispatcher.handle_connection(stream, id).await;
                            }
                            .instrument(span),
                        );
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed, continuing");
                    }
                },
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, no longer accepting");
                    break;
                }
            }
        }

        Ok(())
    }
}
