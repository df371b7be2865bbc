//! ETA bridge - main entry point

use anyhow::Context;
use clap::Parser;
use eta_bridge::{EtaBridge, EtaConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser)]
#[command(name = "eta-bridge")]
#[command(about = "Bridge an ETA heating controller's REST/XML API to sensor readings")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file. Without it, configuration is
    /// read from ETA_* environment variables.
    #[arg(short, long, env = "ETA_BRIDGE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EtaConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EtaConfig::from_env().context("failed to load config from environment")?,
    };

    let mut bridge = EtaBridge::new(config)?;
    bridge.connect().await?;
    bridge.start();

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown signal received");
    bridge.shutdown();

    Ok(())
}
