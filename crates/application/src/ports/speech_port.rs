//! Speech port - Interface for transcription and synthesis

use async_trait::async_trait;
use domain::AudioFormat;

use crate::error::ApplicationError;

/// Result of a transcription operation
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: Option<f32>,
    /// Duration of the audio in milliseconds
    pub duration_ms: Option<u64>,
}

impl TranscriptionResult {
    /// Whether the audio transcribed to no text (silence)
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Result of a speech synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Generated audio data
    pub audio_data: Vec<u8>,
    /// Format of the audio
    pub format: AudioFormat,
}

/// Port for speech processing operations
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Transcribe audio data to text
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
    ) -> Result<TranscriptionResult, ApplicationError>;

    /// Synthesize text to audio using the configured voice
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, ApplicationError>;

    /// Check if the speech services are reachable
    async fn is_available(&self) -> bool;
}
