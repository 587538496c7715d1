//! Command dispatch logic for tidypath

use std::time::Instant;

use crate::cli::paths::resolve_root_path;
use crate::cli::Cli;
use tidypath_core::error::Result;
use tracing::debug;

mod command;
mod commands;
mod macros;

use command::{Command, NoCommand};

pub use command::CommandContext;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path(cli.root.clone());

    debug!(elapsed = ?start.elapsed(), root = %root.display(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
