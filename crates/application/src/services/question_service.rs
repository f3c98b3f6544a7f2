//! Question service - Voice-driven question/answer turns
//!
//! One turn: transcribe the uploaded audio, extend the client-held history
//! with the new utterance, and ask the model for its JSON reply (a follow-up
//! question or a done signal, as defined by the configured system prompt).

use std::{fmt, sync::Arc};

use domain::{AudioFormat, ChatMessage};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{InferencePort, SpeechPort};

/// Result of a question turn
#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    /// The model's JSON reply, returned to the client verbatim
    pub reply: serde_json::Value,
    /// Transcript of the uploaded audio
    pub transcription: String,
}

/// Service for handling voice question turns
pub struct QuestionService {
    speech: Arc<dyn SpeechPort>,
    inference: Arc<dyn InferencePort>,
    system_prompt: String,
}

impl fmt::Debug for QuestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionService")
            .field("system_prompt_len", &self.system_prompt.len())
            .finish_non_exhaustive()
    }
}

impl QuestionService {
    /// Create a new question service
    pub fn new(
        speech: Arc<dyn SpeechPort>,
        inference: Arc<dyn InferencePort>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            speech,
            inference,
            system_prompt: system_prompt.into(),
        }
    }

    /// Handle one question turn
    ///
    /// The user turn is omitted when the audio transcribes to nothing;
    /// silence is not an error. Transcription or completion failures
    /// short-circuit and propagate.
    #[instrument(skip(self, audio, history), fields(audio_size = audio.len(), history_len = history.len()))]
    pub async fn ask(
        &self,
        audio: Vec<u8>,
        format: AudioFormat,
        history: Vec<ChatMessage>,
    ) -> Result<QuestionOutcome, ApplicationError> {
        let transcription = self.speech.transcribe(audio, format).await?;

        debug!(
            transcript_len = transcription.text.len(),
            confidence = ?transcription.confidence,
            "Audio transcribed"
        );

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(&self.system_prompt));
        messages.extend(history);
        if !transcription.is_empty() {
            messages.push(ChatMessage::user(&transcription.text));
        }

        let reply = self.inference.generate_json(&messages).await?;

        Ok(QuestionOutcome {
            reply,
            transcription: transcription.text,
        })
    }

    /// Check if the underlying services are healthy
    pub async fn is_healthy(&self) -> bool {
        self.inference.is_healthy().await && self.speech.is_available().await
    }
}
