use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the affiliation cache.
pub enum CacheError {
    /// Reading, writing or renaming the snapshot failed.
    #[error("cache I/O failed for {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory map could not be encoded.
    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured path exists but is not a regular file.
    #[error("cache path is not a file: {path}")]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
