//! `tidypath path` - storage path of a call
//!
//! Prints the data (or figure) path and creates its directory, exactly as
//! a memoized function would before reading or writing its file.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::commands::PathArgs;
use crate::cli::parse::to_argument_map;
use crate::commands::dispatch::CommandContext;
use crate::output_by_format_result;
use tidypath_core::bail_invalid;
use tidypath_core::error::Result;
use tidypath_core::paths::{ClassRef, FunctionIdentity, PathOptions};
use tidypath_core::storage::DataFormat;
use tidypath_core::value::ArgumentMap;

/// Implicit root base of every class chain, dropped by `skip_bases`
const ROOT_BASE: &str = "object";

#[derive(Debug, Serialize)]
struct PathOutput<'a> {
    path: PathBuf,
    kind: &'static str,
    exists: bool,
    keys: &'a ArgumentMap,
}

/// Execute the path command
pub fn execute(ctx: &CommandContext, args: &PathArgs) -> Result<()> {
    if args.module.trim().is_empty() {
        bail_invalid!("module", "(empty)");
    }
    let config = ctx.config()?;

    let identity = identity(args);
    let keys = to_argument_map(&args.pairs);
    let builder = config.path_builder(ctx.root);

    let (ext, funcname_default) = if args.figure {
        (
            args.ext.clone().unwrap_or_else(|| config.figure.ext.clone()),
            config.figure.funcname_in_filename,
        )
    } else {
        let ext = args.ext.clone().unwrap_or_else(|| config.data.ext.clone());
        DataFormat::from_ext(&ext)?;
        (ext, config.data.funcname_in_filename)
    };

    let opts = PathOptions {
        include_classes: args
            .include_classes
            .unwrap_or(config.keys.include_classes),
        funcname_in_filename: funcname_default && !args.no_funcname,
        subfolder: args.subfolder.clone(),
    };

    let path: PathBuf = if args.figure {
        builder.fig_path(&identity, &keys, &ext, &opts)?.into()
    } else {
        builder.data_path(&identity, &keys, &ext, &opts)?.into()
    };

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = PathOutput {
                exists: path.exists(),
                path: path.clone(),
                kind: if args.figure { "figure" } else { "data" },
                keys: &keys,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            println!("{}", path.display());
        }
    )
}

fn identity(args: &PathArgs) -> FunctionIdentity {
    let mut identity = FunctionIdentity::new(&args.module, args.function.as_str());
    if !args.classes.is_empty() {
        identity = identity.with_class(ClassRef::external(ROOT_BASE));
        for class in &args.classes {
            identity = identity.with_class(class.clone());
        }
    }
    identity
}
