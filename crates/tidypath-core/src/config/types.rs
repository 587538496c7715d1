//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::codec::CodecOptions;
use crate::paths::IncludeClasses;

/// Directory for cached data, relative to the project root
pub const DEFAULT_DATA_DIR: &str = "data";

/// Directory for saved figures, relative to the project root
pub const DEFAULT_FIG_DIR: &str = "figs";

/// Project configuration (`tidypath.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidypathConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_fig_dir")]
    pub fig_dir: String,

    /// Token encoding options
    #[serde(default)]
    pub codec: CodecOptions,

    /// Argument classification options
    #[serde(default)]
    pub keys: KeysConfig,

    /// Defaults for cached data
    #[serde(default)]
    pub data: DataDefaults,

    /// Defaults for saved figures
    #[serde(default)]
    pub figure: FigureDefaults,
}

impl Default for TidypathConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            fig_dir: default_fig_dir(),
            codec: CodecOptions::default(),
            keys: KeysConfig::default(),
            data: DataDefaults::default(),
            figure: FigureDefaults::default(),
        }
    }
}

/// How call arguments are grouped and how class chains are cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Include the `pos_only` count in the `all` group
    pub add_pos_only_to_all: bool,
    /// Number of root base classes dropped from class chains
    pub skip_bases: usize,
    /// Which classes appear as path segments for methods
    pub include_classes: IncludeClasses,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            add_pos_only_to_all: false,
            skip_bases: 1,
            include_classes: IncludeClasses::File,
        }
    }
}

/// Defaults applied to memoized data functions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataDefaults {
    pub ext: String,
    pub keys: String,
    pub funcname_in_filename: bool,
}

impl Default for DataDefaults {
    fn default() -> Self {
        Self {
            ext: "json".to_string(),
            keys: "all".to_string(),
            funcname_in_filename: true,
        }
    }
}

/// Defaults applied to figure functions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureDefaults {
    pub ext: String,
    pub keys: String,
    pub funcname_in_filename: bool,
    pub return_fig: bool,
}

impl Default for FigureDefaults {
    fn default() -> Self {
        Self {
            ext: "svg".to_string(),
            keys: "kwargs".to_string(),
            funcname_in_filename: true,
            return_fig: false,
        }
    }
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_fig_dir() -> String {
    DEFAULT_FIG_DIR.to_string()
}
