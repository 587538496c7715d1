//! Top-level tidypath commands and their arguments

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::parse::{parse_class_ref, parse_include_classes, parse_key_value};
use tidypath_core::paths::{ClassRef, IncludeClasses};
use tidypath_core::value::Value;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default tidypath.toml into the project root
    Init(InitArgs),

    /// Encode KEY=VALUE pairs into a file-name id
    Encode(EncodeArgs),

    /// Decode a file name (or id) back into its arguments
    Decode(DecodeArgs),

    /// Print (and create the directory of) the storage path of a call
    Path(PathArgs),

    /// Add or delete keys in the encoded names of stored files
    Rename(RenameArgs),
}

/// Arguments for the init command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Replace an existing tidypath.toml
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the encode command.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Arguments as KEY=VALUE
    #[arg(value_parser = parse_key_value)]
    pub pairs: Vec<(String, Value)>,
}

/// Arguments for the decode command.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File name or path; directories and the extension are ignored
    pub name: String,
}

/// Arguments for the path command.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Function name
    pub function: String,

    /// Key arguments as KEY=VALUE
    #[arg(value_parser = parse_key_value)]
    pub pairs: Vec<(String, Value)>,

    /// Dotted module of the function (pkg.sub.module)
    #[arg(long, short)]
    pub module: String,

    /// Class chain of a method, outermost base first (repeatable).
    /// A dotted name marks a class defined outside the module.
    #[arg(long = "class", value_parser = parse_class_ref, action = clap::ArgAction::Append)]
    pub classes: Vec<ClassRef>,

    /// Which classes become directories (none, file, all)
    #[arg(long, value_parser = parse_include_classes)]
    pub include_classes: Option<IncludeClasses>,

    /// Leave the function name out of the path
    #[arg(long)]
    pub no_funcname: bool,

    /// Build a figure path instead of a data path
    #[arg(long)]
    pub figure: bool,

    /// File extension (defaults to the configured data or figure extension)
    #[arg(long)]
    pub ext: Option<String>,

    /// Extra directory below the data or figure directory
    #[arg(long)]
    pub subfolder: Option<String>,
}

/// Arguments for the rename command.
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Directory holding the stored files (relative to the root)
    pub dir: PathBuf,

    /// Add or replace these KEY=VALUE pairs
    #[arg(
        long,
        num_args = 1..,
        value_parser = parse_key_value,
        required_unless_present = "delete",
        conflicts_with = "delete"
    )]
    pub add: Vec<(String, Value)>,

    /// Remove these keys
    #[arg(long, num_args = 1..)]
    pub delete: Vec<String>,

    /// Only rename files whose name contains this text
    #[arg(long)]
    pub filter: Option<String>,

    /// Descend into subdirectories
    #[arg(long, short)]
    pub recursive: bool,
}
