//! ## radiomast-cli
//! **Unified operational interface**
//! Radiomast main entrypoint: runs a full station cycle from a deployment
//! plan, answers capacity questions, and dry-runs plans through the
//! registration gate.
//!
//! ### Expectations:
//! - POSIX-compliant argument parsing
//! - Layered configuration (file + RADIOMAST_* environment overrides)
//! - Plain-text reporting suitable for terminals and log capture

use clap::Parser;

use radiomast_telemetry::logging::EventLogger;

mod commands;
mod render;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run_station(args).await?,
        Commands::Capacity(args) => commands::show_capacity(args)?,
        Commands::Check(args) => commands::check_plan(args)?,
    }
    Ok(())
}
