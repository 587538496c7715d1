//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use tidypath_core::config::TidypathConfig;
use tidypath_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Configuration that applies to the project root
    pub fn config(&self) -> Result<TidypathConfig> {
        TidypathConfig::discover(self.root)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("tidypath {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Storage paths for memoized function results and figures.");
        println!();
        println!("Run `tidypath --help` for usage information.");
        Ok(())
    }
}
