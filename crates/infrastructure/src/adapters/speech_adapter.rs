//! Speech adapter - Implements SpeechPort over the transcription and synthesis providers

use std::fmt;
use std::sync::Arc;

use ai_speech::{
    AudioData, DeepgramTranscriber, OpenAITtsProvider, SpeechConfig, SpeechError, SpeechToText,
    TextToSpeech,
};
use application::error::ApplicationError;
use application::ports::{SpeechPort, SynthesisResult, TranscriptionResult};
use async_trait::async_trait;
use domain::AudioFormat;
use tracing::{debug, instrument};

/// Adapter exposing transcription and synthesis through the speech port
pub struct SpeechAdapter {
    transcriber: Arc<DeepgramTranscriber>,
    synthesizer: Arc<OpenAITtsProvider>,
}

impl fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("stt_model", &self.transcriber.model_name())
            .field("tts_model", &self.synthesizer.model_name())
            .finish_non_exhaustive()
    }
}

impl SpeechAdapter {
    /// Create a new speech adapter
    ///
    /// # Errors
    ///
    /// Returns an error if either provider fails to initialize.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let transcriber = DeepgramTranscriber::new(config.clone()).map_err(map_error)?;
        let synthesizer = OpenAITtsProvider::new(config).map_err(map_error)?;

        Ok(Self {
            transcriber: Arc::new(transcriber),
            synthesizer: Arc::new(synthesizer),
        })
    }
}

/// Map a speech error to an application error
fn map_error(err: SpeechError) -> ApplicationError {
    match err {
        SpeechError::Configuration(e) => ApplicationError::Configuration(e),
        SpeechError::RateLimited => ApplicationError::RateLimited,
        SpeechError::InvalidAudio(e) => {
            ApplicationError::Speech(format!("Invalid audio: {e}"))
        },
        other => ApplicationError::Speech(other.to_string()),
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, audio_data), fields(format = ?format, data_size = audio_data.len()))]
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let audio = AudioData::new(audio_data, format);
        let transcription = self.transcriber.transcribe(audio).await.map_err(map_error)?;

        debug!(
            transcript_len = transcription.text.len(),
            confidence = ?transcription.confidence,
            "Transcription complete"
        );

        Ok(TranscriptionResult {
            text: transcription.text,
            confidence: transcription.confidence,
            duration_ms: transcription.duration_ms,
        })
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, ApplicationError> {
        let audio = self
            .synthesizer
            .synthesize(text, None)
            .await
            .map_err(map_error)?;

        debug!(audio_bytes = audio.size_bytes(), "Synthesis complete");

        let format = audio.format();
        Ok(SynthesisResult {
            audio_data: audio.into_data(),
            format,
        })
    }

    async fn is_available(&self) -> bool {
        self.transcriber.is_available().await && self.synthesizer.is_available().await
    }
}
