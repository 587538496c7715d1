//! Tidypath Core Library
//!
//! Deterministic storage paths for function results and figures, derived
//! from where a function lives and the arguments it was called with.

pub mod classify;
pub mod codec;
pub mod config;
pub mod error;
pub mod figure;
pub mod format;
pub mod logging;
pub mod memo;
pub mod paths;
pub mod rename;
pub mod select;
pub mod storage;
pub mod value;

pub use classify::{CallArgs, ClassifiedArgs, Param, ParamKind, Signature};
pub use codec::{
    decode, dict_to_id, encode, id_to_dict, id_updater, stem_to_dict, CodecOptions, UpdateMode,
};
pub use error::{Result, TidypathError};
pub use figure::{Figure, FigureBackend, FigureOptions, HtmlFigure, SaveFig, SvgFigure};
pub use format::OutputFormat;
pub use memo::{CallOptions, SaveData, SaveDataOptions};
pub use paths::{ClassRef, DataPath, FigPath, FunctionIdentity, IncludeClasses, PathBuilder, PathOptions};
pub use rename::{id_renamer, RenameOptions};
pub use select::SelectionSpec;
pub use storage::DataFormat;
pub use value::{ArgumentMap, Value};
