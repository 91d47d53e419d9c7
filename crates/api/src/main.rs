//! Sea Level Dashboard - Main Entry Point
//!
//! Usage: `tide-dashboard [CONFIG_FILE]`

use anyhow::Context;
use api::{init_logging, load_config, run_server};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(path.as_deref()).context("Failed to load configuration")?;

    init_logging(&config.server).context("Failed to install tracing subscriber")?;

    info!("=== Sea Level Dashboard v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config).await
}
