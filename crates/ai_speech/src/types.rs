//! Core types for speech processing

use domain::AudioFormat;
use serde::{Deserialize, Serialize};

/// Audio data with format information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Size of the audio data in bytes
    pub const fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the audio data is empty
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// MIME type for this audio
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Result of a transcription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Confidence score (0.0 - 1.0), if reported by the service
    pub confidence: Option<f32>,
    /// Audio duration in milliseconds, if reported
    pub duration_ms: Option<u64>,
}

impl Transcription {
    /// Create a new transcription
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            duration_ms: None,
        }
    }

    /// Attach a confidence score
    pub const fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Attach the audio duration
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Whether the transcript contains no text
    ///
    /// Silence transcribes to an empty string; callers treat that as a
    /// skipped turn, not an error.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
