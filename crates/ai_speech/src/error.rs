//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Failed to connect to speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to speech service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Invalid audio format or corrupted data
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Transcription failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Invalid response from service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during processing
    #[error("Speech processing timed out")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Voice not found
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Audio processing/merging failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),
}

impl From<reqwest::Error> for SpeechError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcription_failed_error_message() {
        let err = SpeechError::TranscriptionFailed("no speech detected".to_string());
        assert_eq!(err.to_string(), "Transcription failed: no speech detected");
    }

    #[test]
    fn synthesis_failed_error_message() {
        let err = SpeechError::SynthesisFailed("invalid text".to_string());
        assert_eq!(err.to_string(), "Synthesis failed: invalid text");
    }

    #[test]
    fn audio_processing_error_message() {
        let err = SpeechError::AudioProcessing("ffmpeg exited with 1".to_string());
        assert_eq!(err.to_string(), "Audio processing failed: ffmpeg exited with 1");
    }

    #[test]
    fn rate_limited_error_message() {
        assert_eq!(SpeechError::RateLimited.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn configuration_error_message() {
        let err = SpeechError::Configuration("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }
}
