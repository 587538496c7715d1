//! `tidypath rename` - add or delete keys in stored file names

use crate::cli::commands::RenameArgs;
use crate::cli::parse::to_argument_map;
use crate::cli::paths::resolve_under_root;
use crate::commands::dispatch::CommandContext;
use crate::output_by_format_result;
use tidypath_core::codec::UpdateMode;
use tidypath_core::error::Result;
use tidypath_core::rename::{id_renamer, RenameOptions};
use tidypath_core::value::{ArgumentMap, Value};

/// Execute the rename command
pub fn execute(ctx: &CommandContext, args: &RenameArgs) -> Result<()> {
    let config = ctx.config()?;
    let dir = resolve_under_root(ctx.root, &args.dir);

    let (update, mode) = if args.delete.is_empty() {
        (to_argument_map(&args.add), UpdateMode::Add)
    } else {
        let keys: ArgumentMap = args
            .delete
            .iter()
            .map(|key| (key.clone(), Value::Null))
            .collect();
        (keys, UpdateMode::Delete)
    };

    let opts = RenameOptions {
        filter: args.filter.clone(),
        recursive: args.recursive,
        codec: config.codec,
    };
    let count = id_renamer(&update, &dir, mode, &opts)?;

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "status": "ok",
                "dir": dir.display().to_string(),
                "mode": mode,
                "renamed": count,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if ctx.cli.quiet {
                println!("{}", count);
            } else {
                println!("Renamed {} file(s) in {}", count, dir.display());
            }
        }
    )
}
