//! Static file origin server.
//!
//! One request line per connection, `GET` only, files served from a rooted
//! directory with a guessed `Content-Type`. Used as the upstream behind the
//! proxy during manual testing.

use std::path::Path;
use std::sync::Arc;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::Instrument;

use crate::config::OriginConfig;
use crate::error::ProxyError;
use crate::lifecycle::ShutdownSignal;
use crate::net::Listener;
use crate::origin::resolve::{DocumentRoot, Resolution};
use crate::proxy::request::{read_request_line, IncomingRequest};

pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\r\n\r\nBad Request.";
pub const FORBIDDEN: &str = "HTTP/1.1 403 Forbidden\r\n\r\nAccess denied.";
pub const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\r\n\r\nFile not found.";

/// `Content-Type` for a file, by extension.
pub fn content_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}

/// The origin file server.
pub struct OriginServer {
    root: Arc<DocumentRoot>,
}

impl OriginServer {
    /// Create a server for `config.root`. Fails if the root does not exist.
    pub fn new(config: &OriginConfig) -> Result<Self, ProxyError> {
        let root = DocumentRoot::new(&config.root, config.index_file.clone())?;
        tracing::info!(root = %root.path().display(), "Serving files");
        Ok(Self { root: Arc::new(root) })
    }

    /// Accept connections until `shutdown` fires.
    pub async fn run(
        self,
        mut listener: Listener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), ProxyError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Origin server running");

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr, id)) => {
                        let root = Arc::clone(&self.root);
                        let span = tracing::info_span!("origin", connection_id = %id, peer_addr = %peer_addr);
                        tokio::spawn(
                            async move {
                                if let Err(e) = serve(stream, &root).await {
                                    tracing::warn!(error = %e, "Origin connection failed");
                                }
                            }
                            .instrument(span),
                        );
                    }
                    Err(e) => tracing::warn!(error = %e, "Accept failed, continuing"),
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

/// Answer one request on `stream`, then close it.
pub async fn serve<S>(stream: S, root: &DocumentRoot) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut stream = BufReader::new(stream);
    let result = respond(&mut stream, root).await;
    let _ = stream.get_mut().shutdown().await;
    result
}

async fn respond<S>(stream: &mut BufReader<S>, root: &DocumentRoot) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let line = match read_request_line(stream).await {
        Ok(Some(line)) => line,
        Ok(None) => return Ok(()),
        Err(e) => return Err(std::io::Error::other(e)),
    };
    tracing::info!(request = %line, "Received request");

    let request = match IncomingRequest::parse(&line) {
        Ok(request) if request.method() == "GET" => request,
        _ => return write_text(stream, BAD_REQUEST).await,
    };
    let target = request.target();

    match root.resolve(target) {
        Resolution::Forbidden => {
            tracing::warn!(request_target = %target, "Path escapes document root");
            write_text(stream, FORBIDDEN).await
        }
        Resolution::NotFound => write_text(stream, NOT_FOUND).await,
        Resolution::File(path) => {
            let mut file = File::open(&path).await?;
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {}\r\n\r\n",
                content_type(&path)
            );
            stream.write_all(header.as_bytes()).await?;
            let sent = tokio::io::copy(&mut file, stream).await?;
            stream.flush().await?;
            tracing::debug!(path = %path.display(), bytes = sent, "File sent");
            Ok(())
        }
    }
}

async fn write_text<W>(out: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}
