//! Output format handling for tidypath
//!
//! - human: readable, concise output for terminal use
//! - json: stable, machine-readable JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TidypathError;

/// Output format for tidypath commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = TidypathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(TidypathError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// Implement ValueEnum for OutputFormat to work with clap
#[cfg(feature = "clap")]
impl clap::ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[OutputFormat::Human, OutputFormat::Json]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            OutputFormat::Human => Some(clap::builder::PossibleValue::new("human")),
            OutputFormat::Json => Some(clap::builder::PossibleValue::new("json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!(matches!(
            "records".parse::<OutputFormat>(),
            Err(TidypathError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_display_matches_parse() {
        for format in [OutputFormat::Human, OutputFormat::Json] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }
}
