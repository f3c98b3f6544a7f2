//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Book identifier is not 16 lowercase alphanumeric characters
    #[error("Invalid book id: {0}")]
    InvalidBookId(String),

    /// Requested book length is not one of the supported durations
    #[error("Invalid book length: {0} minutes (supported: 3, 10, 30)")]
    InvalidBookLength(u8),

    /// Audio format not recognized
    #[error("Unsupported audio format: {0}")]
    UnsupportedAudioFormat(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_book_id_message() {
        let err = DomainError::InvalidBookId("abc".to_string());
        assert_eq!(err.to_string(), "Invalid book id: abc");
    }

    #[test]
    fn invalid_book_length_message() {
        let err = DomainError::InvalidBookLength(7);
        assert_eq!(
            err.to_string(),
            "Invalid book length: 7 minutes (supported: 3, 10, 30)"
        );
    }

    #[test]
    fn unsupported_audio_format_message() {
        let err = DomainError::UnsupportedAudioFormat("video/mp4".to_string());
        assert_eq!(err.to_string(), "Unsupported audio format: video/mp4");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("messages must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: messages must not be empty"
        );
    }
}
