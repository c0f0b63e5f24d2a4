//! Error types for the source adapters

use thiserror::Error;

/// Errors that can occur while fetching from a news source
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Failed to parse API response or feed document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The adapter has no credential configured
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for NewsError {
    fn from(e: reqwest::Error) -> Self {
        NewsError::RequestFailed(e.to_string())
    }
}
