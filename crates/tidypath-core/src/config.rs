//! Configuration for tidypath
//!
//! Looked up in order:
//! 1. `<root>/tidypath.toml`
//! 2. `$TIDYPATH_CONFIG_DIR/config.toml`, or `~/.config/tidypath/config.toml`
//! 3. built-in defaults

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TidypathError};
use crate::figure::FigureOptions;
use crate::memo::SaveDataOptions;
use crate::paths::PathBuilder;
use crate::select::SelectionSpec;

pub use types::{
    DataDefaults, FigureDefaults, KeysConfig, TidypathConfig, DEFAULT_DATA_DIR, DEFAULT_FIG_DIR,
};

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "tidypath.toml";

const CONFIG_DIR: &str = "tidypath";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "TIDYPATH_CONFIG_DIR";

impl TidypathConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TidypathError::io_operation("read config", path.display(), e))?;
        let config: TidypathConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TidypathError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| TidypathError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    /// Location of the user-wide configuration file, if one can be determined
    pub fn global_config_path() -> Option<PathBuf> {
        let dir = match std::env::var(CONFIG_DIR_ENV_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()?.join(CONFIG_DIR),
        };
        Some(dir.join(CONFIG_FILE))
    }

    /// Find the configuration that applies to a project root.
    pub fn discover(root: &Path) -> Result<Self> {
        Self::discover_with(root, Self::global_config_path().as_deref())
    }

    fn discover_with(root: &Path, global: Option<&Path>) -> Result<Self> {
        let project = root.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            tracing::debug!(path = %project.display(), "loading project config");
            return Self::load(&project);
        }
        if let Some(global) = global.filter(|p| p.is_file()) {
            tracing::debug!(path = %global.display(), "loading global config");
            return Self::load(global);
        }
        Ok(Self::default())
    }

    /// Path builder rooted at `root` with this configuration's layout
    pub fn path_builder(&self, root: &Path) -> PathBuilder {
        PathBuilder::new(root)
            .with_dirs(&self.data_dir, &self.fig_dir)
            .with_codec(self.codec)
            .with_skip_bases(self.keys.skip_bases)
    }

    /// Default options for memoized data functions
    pub fn data_options(&self) -> SaveDataOptions {
        SaveDataOptions {
            ext: self.data.ext.clone(),
            keys: SelectionSpec::from(self.data.keys.as_str()),
            include_classes: self.keys.include_classes,
            funcname_in_filename: self.data.funcname_in_filename,
            add_pos_only_to_all: self.keys.add_pos_only_to_all,
            ..SaveDataOptions::default()
        }
    }

    /// Default options for figure functions
    pub fn figure_options(&self) -> FigureOptions {
        FigureOptions {
            ext: self.figure.ext.clone(),
            keys: SelectionSpec::from(self.figure.keys.as_str()),
            include_classes: self.keys.include_classes,
            funcname_in_filename: self.figure.funcname_in_filename,
            return_fig: self.figure.return_fig,
            add_pos_only_to_all: self.keys.add_pos_only_to_all,
            ..FigureOptions::default()
        }
    }
}
