//! Forward relay proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──"GET <url> HTTP/1.1"──▶ ┌──────────┐   ┌──────────┐   ┌─────────────┐
//!                                    │   net    │──▶│  proxy   │──▶│   routing   │
//!                                    │ listener │   │ handler  │   │ (scheme)    │
//!                                    └──────────┘   └──────────┘   └──────┬──────┘
//!                                                                         │
//!                         ┌────────────────────┬──────────────────────────┤
//!                         ▼                    ▼                          ▼
//!                  relay::http          relay::reply (FTP)      relay::reply (unsupported)
//!                  GET to origin,       "FTP request for: …"    "Unsupported URL protocol."
//!                  bytes back verbatim
//! ```
//!
//! One Tokio task per accepted connection, no limit, no timeouts.

use std::path::PathBuf;

use clap::Parser;

use forward_relay::config::load_or_default;
use forward_relay::lifecycle::{signals, Shutdown};
use forward_relay::net::Listener;
use forward_relay::observability::init_tracing;
use forward_relay::ProxyServer;

#[derive(Debug, Parser)]
#[command(name = "forward-relay")]
#[command(about = "Minimal forward proxy: HTTP relay, FTP stub, everything else refused")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit JSON-formatted logs.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    config.observability.json_logs |= cli.json_logs;

    init_tracing(&config.observability);
    tracing::info!("forward-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        buffer_size = config.relay.buffer_size,
        default_port = config.relay.default_port,
        "Configuration loaded"
    );

    let listener = match Listener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start proxy");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    ProxyServer::new(&config)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
