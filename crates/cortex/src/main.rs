//! Cortex - Entry Point
//!
//! Binary entry point for the cortex server.
//! Lives in the `cortex` facade crate to avoid doc output filename collision
//! with the `cortex_server` library crate (cargo issue #6313).

// Force-link cortex-providers to ensure linkme inventory registrations are included
extern crate cortex_providers;

use clap::Parser;
use cortex_server::run_server;

/// Command line interface for the cortex server
#[derive(Parser, Debug)]
#[command(name = "cortex")]
#[command(about = "Cortex - incremental code index and autocomplete engine")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
}

/// Main entry point for the cortex server. Runs over stdio until the client
/// disconnects.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run_server(cli.config.as_deref()).await
}
