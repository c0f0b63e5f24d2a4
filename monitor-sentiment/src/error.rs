//! Error types for sentiment classification

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SentimentError>;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Inference request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Inference API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Unexpected model output: {0}")]
    UnexpectedOutput(String),
}
