//! Port definitions for speech processing

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Port for speech-to-text implementations
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError>;

    /// Check if the transcription service is reachable
    async fn is_available(&self) -> bool;

    /// Name of the transcription model
    fn model_name(&self) -> &str;
}

/// Port for text-to-speech implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize text to audio
    ///
    /// `voice` overrides the configured default voice when given.
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError>;

    /// Check if the synthesis service is reachable
    async fn is_available(&self) -> bool;

    /// Name of the synthesis model
    fn model_name(&self) -> &str;

    /// The configured default voice
    fn default_voice(&self) -> &str;
}
