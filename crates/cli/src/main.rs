//! # osm-visit CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Dataset loading and validation
//! - Counting and dumping traversals over datasets

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_count, run_dump, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: cli.default_log_level().to_string(),
    })?;

    info!(version = env!("CARGO_PKG_VERSION"), "osm-visit starting");

    let result = match &cli.command {
        Commands::Count(args) => run_count(args),
        Commands::Dump(args) => run_dump(args),
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}
