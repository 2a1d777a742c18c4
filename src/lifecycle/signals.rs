//! OS signal handling.
//!
//! Ctrl-C (SIGINT) stops the accept loop. There is no reload signal: config
//! is read once at startup.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl-C, then trigger `shutdown`.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Ctrl-C received");
            shutdown.trigger();
        }
        Err(e) => {
            tracing::error!(error = %e, "Unable to listen for Ctrl-C, running until killed");
        }
    }
}
