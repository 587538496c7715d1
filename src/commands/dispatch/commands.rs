//! Command implementations for all tidypath commands

use crate::cli::Commands;
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::dispatch::macros::trace_command;
use tidypath_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = match self {
            Commands::Init(args) => commands::init::execute(ctx, args),
            Commands::Encode(args) => commands::encode::execute(ctx, args),
            Commands::Decode(args) => commands::decode::execute(ctx, args),
            Commands::Path(args) => commands::path::execute(ctx, args),
            Commands::Rename(args) => commands::rename::execute(ctx, args),
        };
        trace_command!(ctx.start, "execute_command");
        result
    }
}
