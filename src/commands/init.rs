//! `tidypath init` - write a default project configuration
//!
//! Idempotent: an existing file is left alone unless `--force` is given.

use crate::cli::commands::InitArgs;
use crate::commands::dispatch::CommandContext;
use crate::output_by_format_result;
use tidypath_core::bail_usage;
use tidypath_core::config::{TidypathConfig, PROJECT_CONFIG_FILE};
use tidypath_core::error::Result;

/// Execute the init command
pub fn execute(ctx: &CommandContext, args: &InitArgs) -> Result<()> {
    if !ctx.root.is_dir() {
        bail_usage!(format!("root {} is not a directory", ctx.root.display()));
    }

    let path = ctx.root.join(PROJECT_CONFIG_FILE);
    let created = if path.exists() && !args.force {
        tracing::debug!(path = %path.display(), "config already present");
        false
    } else {
        TidypathConfig::default().save(&path)?;
        tracing::info!(path = %path.display(), "wrote config");
        true
    };

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "status": "ok",
                "config": path.display().to_string(),
                "created": created,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if created {
                println!("Initialized tidypath config at {}", path.display());
            } else if !ctx.cli.quiet {
                println!("Config already exists at {}", path.display());
            }
        }
    )
}
