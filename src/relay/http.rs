//! HTTP relay: one upstream GET, raw byte passthrough back to the client.
//!
//! # Responsibilities
//! - Open a new upstream connection per request (never pooled)
//! - Send the minimal `GET <path> HTTP/1.1` + `Host` request
//! - Copy upstream bytes to the client chunk by chunk until upstream EOF
//!
//! # Design Decisions
//! - No header parsing, no chunked-encoding awareness, no buffering beyond one chunk
//! - No timeouts: a silent upstream holds this worker until it closes
//! - On failure, bytes already relayed stay sent; the error line follows them

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use crate::relay::reply;
use crate::relay::target::TargetUrl;

/// Build the request line and headers sent upstream.
///
/// An empty path is sent as-is.
pub fn upstream_request(target: &TargetUrl) -> String {
    format!("GET {} HTTP/1.1\r\nHost: {}\r\n\r\n", target.path(), target.host())
}

/// Relays HTTP GETs for one worker.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    buffer_size: usize,
    default_port: u16,
}

impl HttpRelay {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            buffer_size: config.buffer_size.max(1),
            default_port: config.default_port,
        }
    }

    /// Relay `raw_target` and answer the client with the error line on failure.
    ///
    /// Returns the number of upstream bytes delivered on success.
    pub async fn handle<W>(&self, raw_target: &str, client: &mut W) -> RelayResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let result = self.relay(raw_target, client).await;
        settle(result, client).await
    }

    /// Connect upstream, send the request and stream the response back.
    pub async fn relay<W>(&self, raw_target: &str, client: &mut W) -> RelayResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let target = TargetUrl::parse(raw_target)?;
        let port = target.port_or(self.default_port);

        tracing::debug!(host = %target.host(), port, path = %target.path(), "Connecting upstream");

        let mut upstream = TcpStream::connect((target.connect_host(), port))
            .await
            .map_err(|source| RelayError::UpstreamConnect {
                addr: format!("{}:{}", target.host(), port),
                source,
            })?;

        upstream
            .write_all(upstream_request(&target).as_bytes())
            .await
            .map_err(RelayError::UpstreamIo)?;
        upstream.flush().await.map_err(RelayError::UpstreamIo)?;

        let relayed = self.forward(&mut upstream, client).await?;

        tracing::debug!(host = %target.host(), port, bytes = relayed, "Upstream response relayed");
        Ok(relayed)
    }

    /// Copy `upstream` into `client` until `upstream` reaches EOF.
    pub async fn forward<R, W>(&self, upstream: &mut R, client: &mut W) -> RelayResult<u64>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = vec![0u8; self.buffer_size];
        let mut total = 0u64;

        loop {
            let n = upstream.read(&mut buf).await.map_err(RelayError::UpstreamIo)?;
            if n == 0 {
                break;
            }
            client
                .write_all(&buf[..n])
                .await
                .map_err(RelayError::ClientIo)?;
            total += n as u64;
        }

        client.flush().await.map_err(RelayError::ClientIo)?;
        Ok(total)
    }
}

/// Send the error line after a failed relay, unless the client itself failed.
async fn settle<W>(result: RelayResult<u64>, client: &mut W) -> RelayResult<u64>
where
    W: AsyncWrite + Unpin,
{
    if let Err(e) = &result {
        if e.notifies_client() {
            if let Err(send_err) = reply::send(client, reply::HTTP_ERROR).await {
                tracing::debug!(error = %send_err, "Could not deliver HTTP error line");
            }
        }
    }
    result
}

impl Default for HttpRelay {
    fn default() -> Self {
        Self::new(&RelayConfig::default())
    }
}
