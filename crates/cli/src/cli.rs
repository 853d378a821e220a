//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// osm-visit - Visit buffered OSM records with handlers and callables
#[derive(Parser, Debug)]
#[command(
    name = "osm-visit",
    author,
    version,
    about = "Visit buffered OSM record datasets",
    long_about = "Loads record datasets (TOML or JSON), walks them in order and \n\
                  dispatches every record to the built-in visitors: counting, \n\
                  logging and printing."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "OSM_VISIT_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "OSM_VISIT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Level used when `RUST_LOG` is unset
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count entities and groups in one or more datasets
    Count(CountArgs),

    /// Print and log entities as they are visited; composites only with --strict
    Dump(DumpArgs),

    /// Validate a dataset file without visiting it
    Validate(ValidateArgs),
}

/// Arguments for the `count` command
#[derive(Parser, Debug)]
pub struct CountArgs {
    /// Dataset files (TOML or JSON); counted as separate traversals
    #[arg(required = true, env = "OSM_VISIT_DATASET", value_delimiter = ',')]
    pub files: Vec<PathBuf>,

    /// Pass every record to the handler; a non-entity record aborts the run
    #[arg(long)]
    pub strict: bool,

    /// Output counts as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `dump` command
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Dataset file (TOML or JSON)
    #[arg(env = "OSM_VISIT_DATASET")]
    pub file: PathBuf,

    /// Also print composite and raw records. The log handler rejects the
    /// first one, so printing stops there and the run fails
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Dataset file to validate
    #[arg(env = "OSM_VISIT_DATASET")]
    pub file: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
