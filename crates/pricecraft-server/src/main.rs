//! PriceCraft backend server binary.

use anyhow::Context;
use clap::Parser;
use log::info;
use pricecraft_config::load_optional_config;
use pricecraft_server::AppState;
use std::path::PathBuf;

/// Command-line arguments for the server binary.
#[derive(Debug, Parser)]
#[command(name = "pricecraftd", about = "PriceCraft analysis backend")]
struct Args {
    /// Path to a json5 config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured bind host.
    #[arg(long)]
    host: Option<String>,
    /// Override the configured bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_optional_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(&config);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, pricecraft_server::router(state))
        .await
        .context("server exited")?;
    Ok(())
}
