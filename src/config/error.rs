//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    ParseInt {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A numeric variable parsed but is outside its accepted range.
    #[error("invalid {name}='{value}': {reason}")]
    OutOfRange {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// `PARTISAN_CANDIDATE_FILTER` named an unknown filter mode.
    #[error("unknown candidate filter '{value}': expected 'strict' or 'loose'")]
    UnknownFilter { value: String },

    /// A boolean variable was not one of the accepted spellings.
    #[error("invalid boolean {name}='{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// An endpoint URL was empty.
    #[error("endpoint {name} must not be empty")]
    EmptyEndpoint { name: &'static str },

    /// The cache path exists but is a directory.
    #[error("cache path is a directory, expected a file: {path}")]
    CachePathIsDirectory { path: PathBuf },
}
