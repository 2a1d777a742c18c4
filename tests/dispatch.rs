//! Scheme dispatch and malformed-input tests over real sockets.

use std::time::Duration;

use forward_relay::config::ProxyConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

#[tokio::test]
async fn ftp_target_gets_canned_acknowledgement() {
    let (proxy, _shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let reply = common::get(proxy, "ftp://host/path").await;
    assert_eq!(reply, b"FTP request for: /path on server: host");
}

#[tokio::test]
async fn ftp_target_without_path() {
    let (proxy, _shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let reply = common::get(proxy, "ftp://files.example.org").await;
    assert_eq!(reply, b"FTP request for:  on server: files.example.org");
}

#[tokio::test]
async fn ftp_reply_echoes_host_and_path_as_written() {
    let (proxy, _shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let reply = common::get(proxy, "ftp://Mirror.Example/pub/./x/../y").await;
    assert_eq!(reply, b"FTP request for: /pub/./x/../y on server: Mirror.Example");
}

#[tokio::test]
async fn unrecognised_scheme_is_refused() {
    let (proxy, _shutdown) = common::start_proxy(ProxyConfig::default()).await;

    for url in ["gopher://x", "file:///etc/passwd", "example.com/index.html", "HTTP://upper.case/"] {
        let reply = common::get(proxy, url).await;
        assert_eq!(reply, b"Unsupported URL protocol.", "{url}");
    }
}

#[tokio::test]
async fn one_token_line_is_answered_and_acceptor_survives() {
    let (proxy, _shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let reply = common::send_raw(proxy, b"GET\r\n").await;
    assert_eq!(reply, b"Malformed request line.");

    let reply = common::send_raw(proxy, b"\r\n").await;
    assert_eq!(reply, b"Malformed request line.");

    let reply = common::get(proxy, "ftp://still/up").await;
    assert_eq!(reply, b"FTP request for: /up on server: still");
}

#[tokio::test]
async fn immediate_close_gets_no_reply() {
    let (proxy, _shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let mut stream = TcpStream::connect(proxy).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut reply = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut reply))
        .await
        .unwrap()
        .unwrap();
    assert!(reply.is_empty());
}

#[tokio::test]
async fn shutdown_stops_accepting() {
    let (proxy, shutdown) = common::start_proxy(ProxyConfig::default()).await;
    assert_eq!(common::get(proxy, "gopher://x").await, b"Unsupported URL protocol.");

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(TcpStream::connect(proxy).await.is_err());
}
