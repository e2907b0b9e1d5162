//! Client error types
//!
//! Only infrastructure failures live here. Door decisions (valid, already
//! used, invalid...) arrive as [`shared::models::ScanOutcome`] values on a
//! 200 response and never pass through this type.

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the request itself (4xx envelope)
    #[error("Request rejected [{code}]: {message}")]
    Rejected { code: String, message: String },

    /// Server-side failure (5xx envelope)
    #[error("Server error [{code}]: {message}")]
    Server { code: String, message: String },

    /// Response body did not parse
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the failure is "unknown — retry" territory.
    ///
    /// Transport problems and server-side failures say nothing about the
    /// ticket; staff must never deny entry on them. A `Rejected` request
    /// is a client bug (malformed payload) and retrying it verbatim will
    /// not help.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(_) | ClientError::Server { .. } => true,
            ClientError::InvalidResponse(_) => true,
            ClientError::Rejected { .. } | ClientError::Serialization(_) => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
