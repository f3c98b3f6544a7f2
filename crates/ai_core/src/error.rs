//! Inference errors

use thiserror::Error;

/// Errors that can occur during chat completion
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to connect to the completion API
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the completion API failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Model not found or not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during completion
    #[error("Completion timed out")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server-side error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
