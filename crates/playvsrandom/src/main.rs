//! playvsrandom - chess in the terminal against a random opponent.

#![warn(missing_docs)]

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use playvsrandom::{AppConfig, Cli};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;

    init_logging(config.log_file())?;
    info!(
        opponent_delay_ms = config.opponent_delay_ms(),
        reset_delay_ms = config.reset_delay_ms(),
        seed = ?config.seed(),
        "Starting playvsrandom"
    );

    playvsrandom::run(config).await
}

/// Logs to a file so output does not interfere with the terminal UI.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
