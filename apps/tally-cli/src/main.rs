//! # Tally CLI
//!
//! Back-office pricing, expenses and row management from the terminal.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             tally                                       │
//! │                                                                         │
//! │  args ──► clap ──► Command ──┬──► tally-core   (price, expenses, grid) │
//! │                              │                                          │
//! │  TALLY_* ──► AppConfig ──────┴──► tally-store  (REST rows) ──► API     │
//! │                                                                         │
//! │  Logs go to stderr (RUST_LOG, else TALLY_LOG); results go to stdout.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Back-office pricing and expenses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        overhead = %config.overhead_pct,
        mode = %config.pricing_mode,
        "Starting tally v{}",
        env!("CARGO_PKG_VERSION")
    );

    let output = commands::run(cli.command, &config).await?;
    print!("{output}");
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
