//! Error types and exit codes for tidypath
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO, serialization)
//! - 2: Usage or configuration error (unknown key, unsupported output)
//! - 3: Data error (missing file or directory)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage or configuration error (2)
    Usage = 2,
    /// Data error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while building paths or caching results
#[derive(Error, Debug)]
pub enum TidypathError {
    // Configuration errors (exit code 2)
    #[error("unknown key '{key}' (available: {available})")]
    UnknownKey { key: String, available: String },

    #[error("unknown argument group '{0}' (expected: args, kwargs, kwargs_defaults, kwargs_full, pos_only, all)")]
    UnknownGroup(String),

    #[error("invalid call to {function}: {reason}")]
    InvalidCall { function: String, reason: String },

    #[error("{0}")]
    UsageError(String),

    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    // Data errors (exit code 3)
    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl TidypathError {
    /// Create an error for a selection key that no argument group provides
    pub fn unknown_key<I, S>(key: &str, available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let available: Vec<String> = available
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        TidypathError::UnknownKey {
            key: key.to_string(),
            available: if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            },
        }
    }

    /// Create an error for a call that does not fit the declared parameters
    pub fn invalid_call(function: &str, reason: impl std::fmt::Display) -> Self {
        TidypathError::InvalidCall {
            function: function.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        TidypathError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        TidypathError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        TidypathError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        TidypathError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TidypathError::UnknownKey { .. }
            | TidypathError::UnknownGroup(_)
            | TidypathError::InvalidCall { .. }
            | TidypathError::UsageError(_)
            | TidypathError::UnknownFormat(_)
            | TidypathError::InvalidValue { .. }
            | TidypathError::Unsupported { .. } => ExitCode::Usage,

            TidypathError::NotFound { .. } | TidypathError::DirectoryNotFound(_) => {
                ExitCode::Data
            }

            TidypathError::Io(_)
            | TidypathError::Json(_)
            | TidypathError::Yaml(_)
            | TidypathError::Toml(_)
            | TidypathError::FailedOperationWithTarget { .. }
            | TidypathError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            TidypathError::UnknownKey { .. } => "unknown_key",
            TidypathError::UnknownGroup(_) => "unknown_group",
            TidypathError::InvalidCall { .. } => "invalid_call",
            TidypathError::UsageError(_) => "usage_error",
            TidypathError::UnknownFormat(_) => "unknown_format",
            TidypathError::InvalidValue { .. } => "invalid_value",
            TidypathError::Unsupported { .. } => "unsupported",
            TidypathError::NotFound { .. } => "not_found",
            TidypathError::DirectoryNotFound(_) => "directory_not_found",
            TidypathError::Io(_) => "io_error",
            TidypathError::Json(_) => "json_error",
            TidypathError::Yaml(_) => "yaml_error",
            TidypathError::Toml(_) => "toml_error",
            TidypathError::FailedOperationWithTarget { .. } => "failed_operation",
            TidypathError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for tidypath operations
pub type Result<T> = std::result::Result<T, TidypathError>;
