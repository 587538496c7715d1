//! `tidypath decode` - recover the arguments encoded in a file name

use std::path::Path;

use crate::cli::commands::DecodeArgs;
use crate::commands::dispatch::CommandContext;
use crate::output_by_format_result;
use tidypath_core::codec::{split_ext, stem_to_dict};
use tidypath_core::error::Result;
use tidypath_core::paths::is_hashed_stem;
use tidypath_core::value::ArgumentMap;
use tidypath_core::{bail_invalid, bail_usage};

/// Execute the decode command
pub fn execute(ctx: &CommandContext, args: &DecodeArgs) -> Result<()> {
    let file = Path::new(&args.name)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    if file.is_empty() {
        bail_usage!(format!("nothing to decode in '{}'", args.name));
    }

    let (stem, _ext) = split_ext(&file);
    if is_hashed_stem(stem) {
        bail_invalid!("encoded name", format!("{} is a digest of an over-long id", file));
    }
    let map = stem_to_dict(stem);

    output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&map)?);
            Ok(())
        },
        human => {
            print_human(ctx, &map);
        }
    )
}

fn print_human(ctx: &CommandContext, map: &ArgumentMap) {
    if map.is_empty() {
        if !ctx.cli.quiet {
            println!("(no arguments)");
        }
        return;
    }
    for (key, value) in map {
        println!("{} = {}", key, value);
    }
}
