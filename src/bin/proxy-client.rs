use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use forward_relay::client::{is_exit, ProxyClient};
use forward_relay::config::load_or_default;
use forward_relay::observability::init_tracing;

#[derive(Parser)]
#[command(name = "proxy-client")]
#[command(about = "Send one request through the forward relay and print the raw reply", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Proxy address, overriding `client.proxy_address`.
    #[arg(short, long)]
    proxy: Option<String>,

    /// URL to request. Prompted for on stdin when absent.
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    init_tracing(&config.observability);

    let proxy = cli.proxy.unwrap_or(config.client.proxy_address);
    let client = ProxyClient::connect(&proxy).await?;
    println!("Connected to Proxy Server.");

    let url = match cli.url {
        Some(url) => url,
        None => {
            print!("Enter URL (or 'exit' to quit): ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
            line.trim().to_string()
        }
    };

    if is_exit(&url) {
        println!("Exiting...");
        return Ok(());
    }

    let reply = client.request(&url).await?;
    for line in String::from_utf8_lossy(&reply).lines() {
        println!("{}", line);
    }

    Ok(())
}
