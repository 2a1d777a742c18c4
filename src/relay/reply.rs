//! Canned plain-text replies.
//!
//! None of these carry an HTTP status line, headers or a trailing newline.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{RelayError, RelayResult};
use crate::relay::target::TargetUrl;

pub const UNSUPPORTED_PROTOCOL: &str = "Unsupported URL protocol.";
pub const MALFORMED_REQUEST: &str = "Malformed request line.";
pub const HTTP_ERROR: &str = "Error processing HTTP request.";
pub const FTP_ERROR: &str = "Error processing FTP request.";

/// The acknowledgement sent for an `ftp://` target.
pub fn ftp_message(target: &TargetUrl) -> String {
    format!("FTP request for: {} on server: {}", target.path(), target.host())
}

/// Write `text` to the client and flush.
pub async fn send<W>(client: &mut W, text: &str) -> RelayResult<()>
where
    W: AsyncWrite + Unpin,
{
    client
        .write_all(text.as_bytes())
        .await
        .map_err(RelayError::ClientIo)?;
    client.flush().await.map_err(RelayError::ClientIo)
}

/// Answer an `ftp://` target without touching the network.
pub async fn ftp_stub<W>(client: &mut W, raw_target: &str) -> RelayResult<()>
where
    W: AsyncWrite + Unpin,
{
    match TargetUrl::parse(raw_target) {
        Ok(target) => {
            tracing::debug!(host = %target.host(), path = %target.path(), "FTP stub reply");
            send(client, &ftp_message(&target)).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "FTP target rejected");
            send(client, FTP_ERROR).await
        }
    }
}
