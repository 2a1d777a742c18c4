use std::path::PathBuf;

use clap::Parser;

use forward_relay::config::load_or_default;
use forward_relay::lifecycle::{signals, Shutdown};
use forward_relay::net::Listener;
use forward_relay::observability::init_tracing;
use forward_relay::origin::OriginServer;

#[derive(Parser)]
#[command(name = "origin-server")]
#[command(about = "Serve static files over a bare HTTP/1.1 socket", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `origin.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `origin.root`.
    #[arg(short, long)]
    root: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.origin.bind_address = bind;
    }
    if let Some(root) = cli.root {
        config.origin.root = root;
    }

    init_tracing(&config.observability);

    let server = OriginServer::new(&config.origin)?;
    let listener = Listener::bind(&config.origin.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
