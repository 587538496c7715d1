//! `tidypath encode` - render KEY=VALUE pairs as a file-name id

use crate::cli::commands::EncodeArgs;
use crate::cli::parse::to_argument_map;
use crate::commands::dispatch::CommandContext;
use crate::output_by_format_result;
use tidypath_core::codec::dict_to_id;
use tidypath_core::error::Result;

/// Execute the encode command
pub fn execute(ctx: &CommandContext, args: &EncodeArgs) -> Result<()> {
    let config = ctx.config()?;
    let map = to_argument_map(&args.pairs);
    let id = dict_to_id(&map, &config.codec);

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = serde_json::json!({
                "id": id,
                "args": map,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            println!("{}", id);
        }
    )
}
