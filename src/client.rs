//! Manual test client: send one request line through the proxy, collect the
//! raw reply until the proxy closes the connection.

use std::io;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// The request the client sends for `url`.
pub fn request_text(url: &str, proxy_host: &str) -> String {
    format!("GET {url} HTTP/1.1\r\nHost: {proxy_host}\r\n\r\n")
}

/// Host part of an `host:port` address.
pub fn host_of(addr: &str) -> &str {
    addr.rsplit_once(':').map(|(host, _)| host).unwrap_or(addr)
}

/// Whether the user asked to quit instead of entering a URL.
pub fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("exit")
}

/// An open connection to the proxy, good for exactly one request.
pub struct ProxyClient {
    stream: TcpStream,
    proxy_host: String,
}

impl ProxyClient {
    /// Connect to the proxy at `proxy_addr` (`host:port`).
    pub async fn connect(proxy_addr: &str) -> io::Result<Self> {
        let stream = TcpStream::connect(proxy_addr).await?;
        tracing::debug!(proxy = %proxy_addr, "Connected to proxy");
        Ok(Self {
            stream,
            proxy_host: host_of(proxy_addr).to_string(),
        })
    }

    /// Send the request for `url` and read until the proxy closes.
    pub async fn request(mut self, url: &str) -> io::Result<Vec<u8>> {
        self.stream
            .write_all(request_text(url, &self.proxy_host).as_bytes())
            .await?;
        self.stream.flush().await?;

        let mut reply = Vec::new();
        self.stream.read_to_end(&mut reply).await?;
        Ok(reply)
    }
}

/// Connect to the proxy at `proxy_addr`, request `url`, return the reply bytes.
pub async fn fetch(proxy_addr: &str, url: &str) -> io::Result<Vec<u8>> {
    ProxyClient::connect(proxy_addr).await?.request(url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_has_proxy_host() {
        assert_eq!(
            request_text("http://a/b", "127.0.0.1"),
            "GET http://a/b HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n"
        );
    }

    #[test]
    fn host_of_address() {
        assert_eq!(host_of("127.0.0.1:9090"), "127.0.0.1");
        assert_eq!(host_of("localhost"), "localhost");
    }

    #[test]
    fn exit_is_case_insensitive() {
        assert!(is_exit("exit"));
        assert!(is_exit("EXIT\n"));
        assert!(!is_exit("http://exit"));
    }
}
