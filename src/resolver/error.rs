use thiserror::Error;

#[derive(Debug, Error)]
/// Failures talking to a knowledge source.
///
/// These are transport-level problems, never domain answers: a page without a party is
/// [`PropertyLookup::Absent`](super::PropertyLookup::Absent), not an error.
pub enum SourceError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// Endpoint that timed out.
        url: String,
    },

    /// Connection, DNS or body-read failure.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Endpoint.
        url: String,
        /// Error message.
        message: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Endpoint.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not the JSON shape expected.
    #[error("unexpected response from {url}: {message}")]
    Parse {
        /// Endpoint.
        url: String,
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Maps a `reqwest` failure, separating timeouts from other transport errors.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_decode() {
            SourceError::Parse {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            SourceError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Convenience result type for knowledge-source calls.
pub type SourceResult<T> = Result<T, SourceError>;
