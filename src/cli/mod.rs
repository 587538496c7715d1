//! CLI argument parsing for tidypath
//!
//! Global flags: --root, --format, --quiet, --verbose, --log-level, --log-json

pub mod commands;
pub mod format;
pub mod output;
pub mod parse;
pub mod paths;

use clap::Parser;
use std::path::PathBuf;

pub use commands::Commands;
pub use output::OutputFormat;

/// Tidypath - storage paths for memoized function results and figures
#[derive(Parser, Debug)]
#[command(name = "tidypath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root holding tidypath.toml and the data/figure directories
    #[arg(long, global = true, env = "TIDYPATH_ROOT")]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace) or a full filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
