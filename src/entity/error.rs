use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a [`Tagger`](super::Tagger).
pub enum TaggerError {
    /// The tagger rejected or could not process the input.
    #[error("tagging failed: {reason}")]
    Failed {
        /// Error message.
        reason: String,
    },

    /// The tagger backend is not available (model not loaded, service down).
    #[error("tagger unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for tagging.
pub type TaggerResult<T> = Result<T, TaggerError>;
