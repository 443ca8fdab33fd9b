//! Error types for knowledge-base requests

use std::time::Duration;
use thiserror::Error;

/// Result type alias for knowledge-base operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Errors raised by a single knowledge-base request.
///
/// All of these are contained by the caller: a failed career query yields an
/// empty career, a failed page is retried and then ends pagination.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Connection, TLS or body read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request exceeded its timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success HTTP status
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// Body was not the JSON we expected
    #[error("malformed response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// Identifier that cannot be safely placed in a query
    #[error("invalid entity identifier: {0}")]
    InvalidEntity(String),
}

impl SourceError {
    /// Classify a reqwest error, separating timeouts
    pub fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err)
        }
    }

    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Status { endpoint: endpoint.into(), status }
    }

    pub fn decode(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode { endpoint: endpoint.into(), reason: reason.to_string() }
    }
}
