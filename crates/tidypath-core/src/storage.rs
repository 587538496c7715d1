//! Storage backends keyed by file extension

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bail_unsupported;
use crate::error::{Result, TidypathError};

/// Serialization format of a cached result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    pub const SUPPORTED: &'static str = "json, yaml, yml, toml";

    /// Pick the backend for a file extension (without the dot)
    pub fn from_ext(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            "toml" => Ok(DataFormat::Toml),
            other => bail_unsupported!("data extension", other, Self::SUPPORTED),
        }
    }

    /// Write `value` to `path`, replacing any existing file
    pub fn save<T: Serialize + ?Sized>(&self, value: &T, path: &Path) -> Result<()> {
        let content = match self {
            DataFormat::Json => serde_json::to_string_pretty(value)?,
            DataFormat::Yaml => serde_yaml::to_string(value)?,
            DataFormat::Toml => toml::to_string_pretty(value).map_err(|e| {
                TidypathError::io_operation("serialize toml for", path.display(), e)
            })?,
        };
        fs::write(path, content)
            .map_err(|e| TidypathError::io_operation("write", path.display(), e))?;
        tracing::debug!(path = %path.display(), format = %self, "saved data");
        Ok(())
    }

    /// Read a value previously written with [`DataFormat::save`]
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)
            .map_err(|e| TidypathError::io_operation("read", path.display(), e))?;
        let value = match self {
            DataFormat::Json => serde_json::from_str(&content)?,
            DataFormat::Yaml => serde_yaml::from_str(&content)?,
            DataFormat::Toml => toml::from_str(&content)?,
        };
        tracing::debug!(path = %path.display(), format = %self, "loaded data");
        Ok(value)
    }
}

impl FromStr for DataFormat {
    type Err = TidypathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_ext(s)
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Json => write!(f, "json"),
            DataFormat::Yaml => write!(f, "yaml"),
            DataFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Save with the backend chosen by `ext`
pub fn save_ext<T: Serialize + ?Sized>(ext: &str, value: &T, path: &Path) -> Result<()> {
    DataFormat::from_ext(ext)?.save(value, path)
}

/// Load with the backend chosen by `ext`
pub fn load_ext<T: DeserializeOwned>(ext: &str, path: &Path) -> Result<T> {
    DataFormat::from_ext(ext)?.load(path)
}
