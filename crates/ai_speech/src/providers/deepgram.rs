//! Deepgram transcription provider
//!
//! Implements `SpeechToText` against Deepgram's pre-recorded transcription
//! API. The audio is sent as a raw request body with its MIME type; the
//! transcript is taken from the first alternative of the first channel.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::{AudioData, Transcription};

/// Deepgram pre-recorded transcription provider
#[derive(Debug, Clone)]
pub struct DeepgramTranscriber {
    client: Client,
    config: SpeechConfig,
}

impl DeepgramTranscriber {
    /// Create a new Deepgram transcriber
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        if config.deepgram_api_key.as_deref().is_none_or(str::is_empty) {
            return Err(SpeechError::Configuration(
                "Deepgram API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.deepgram_api_key.as_deref().unwrap_or_default()
    }

    /// Build the transcription endpoint URL with query parameters
    fn listen_url(&self) -> String {
        format!(
            "{}/v1/listen?model={}&smart_format={}",
            self.config.deepgram_base_url.trim_end_matches('/'),
            self.config.stt_model,
            self.config.smart_format
        )
    }
}

/// Deepgram pre-recorded response (the parts we read)
#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
    #[serde(default)]
    metadata: Option<ListenMetadata>,
}

#[derive(Debug, Deserialize)]
struct ListenMetadata {
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

/// Deepgram error response
#[derive(Debug, Deserialize)]
struct DeepgramError {
    err_msg: String,
}

#[async_trait]
impl SpeechToText for DeepgramTranscriber {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), format = %audio.format()))]
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        debug!("Transcribing audio with Deepgram");

        let mime_type = audio.mime_type();
        let response = self
            .client
            .post(self.listen_url())
            .header("Authorization", format!("Token {}", self.api_key()))
            .header("Content-Type", mime_type)
            .body(audio.into_data())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %error_body, "Deepgram request failed");

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(SpeechError::RateLimited);
            }
            if let Ok(dg_error) = serde_json::from_str::<DeepgramError>(&error_body) {
                return Err(SpeechError::TranscriptionFailed(dg_error.err_msg));
            }
            return Err(SpeechError::TranscriptionFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let listen: ListenResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let alternative = listen
            .results
            .channels
            .into_iter()
            .next()
            .and_then(|c| c.alternatives.into_iter().next())
            .ok_or_else(|| {
                SpeechError::InvalidResponse("Response contains no alternatives".to_string())
            })?;

        debug!(
            text_len = alternative.transcript.len(),
            confidence = ?alternative.confidence,
            "Transcription complete"
        );

        let mut transcription = Transcription::new(alternative.transcript);

        if let Some(confidence) = alternative.confidence {
            transcription = transcription.with_confidence(confidence);
        }

        if let Some(duration) = listen.metadata.and_then(|m| m.duration) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let duration_ms = (duration * 1000.0) as u64;
            transcription = transcription.with_duration(duration_ms);
        }

        Ok(transcription)
    }

    async fn is_available(&self) -> bool {
        // Deepgram exposes a projects endpoint usable as an auth/reachability probe
        let url = format!(
            "{}/v1/projects",
            self.config.deepgram_base_url.trim_end_matches('/')
        );

        match self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.api_key()))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Deepgram availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.stt_model
    }
}
