//! OpenAI text-to-speech provider
//!
//! Implements `TextToSpeech` using the OpenAI speech API. The API limits
//! input to 4096 characters per request; longer text is split on sentence
//! boundaries and the returned audio segments are concatenated. MP3 frames
//! are self-contained, so byte concatenation produces playable output.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use domain::AudioFormat;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::AudioData;

/// Maximum input length accepted by the OpenAI speech endpoint
const MAX_INPUT_CHARS: usize = 4096;

/// OpenAI text-to-speech provider
#[derive(Debug, Clone)]
pub struct OpenAITtsProvider {
    client: Client,
    config: SpeechConfig,
}

impl OpenAITtsProvider {
    /// Create a new OpenAI TTS provider
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        if config.openai_api_key.as_deref().is_none_or(str::is_empty) {
            return Err(SpeechError::Configuration(
                "OpenAI API key is required".to_string(),
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
        self.config.openai_api_key.as_deref().unwrap_or_default()
    }

    fn tts_url(&self) -> String {
        format!(
            "{}/audio/speech",
            self.config.openai_base_url.trim_end_matches('/')
        )
    }

    /// Convert an audio format to the API's response format string
    const fn response_format(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            // Ogg and WebM both carry opus audio
            AudioFormat::Ogg | AudioFormat::Webm => "opus",
            AudioFormat::M4a => "aac",
        }
    }

    /// Split text into chunks below the API input limit
    ///
    /// Splits on sentence endings so no request cuts a sentence in half.
    /// A single sentence longer than the limit is hard-split as a fallback.
    fn chunk_text(text: &str) -> Vec<String> {
        if text.len() <= MAX_INPUT_CHARS {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for sentence in split_sentences(text) {
            if current.len() + sentence.len() > MAX_INPUT_CHARS && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            if sentence.len() > MAX_INPUT_CHARS {
                // Degenerate input without sentence boundaries
                for piece in hard_split(sentence, MAX_INPUT_CHARS) {
                    chunks.push(piece.to_string());
                }
            } else {
                current.push_str(sentence);
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }

    /// Send one synthesis request for a single chunk
    async fn synthesize_chunk(&self, text: &str, voice: &str) -> Result<Bytes, SpeechError> {
        let request = TtsRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            response_format: Some(Self::response_format(self.config.output_format)),
            speed: if (self.config.speed - 1.0).abs() < f32::EPSILON {
                None
            } else {
                Some(self.config.speed)
            },
        };

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(self.api_key())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %error_body, "TTS request failed");

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_body) {
                return match api_error.error.code.as_deref() {
                    Some("rate_limit_exceeded") => Err(SpeechError::RateLimited),
                    Some("model_not_found") => Err(SpeechError::ModelNotAvailable(
                        self.config.tts_model.clone(),
                    )),
                    Some("invalid_voice") => Err(SpeechError::VoiceNotFound(voice.to_string())),
                    _ => Err(SpeechError::SynthesisFailed(api_error.error.message)),
                };
            }

            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))
    }
}

/// Iterate over sentences, each including its terminator and trailing space
fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .char_indices()
            .find(|(_, c)| matches!(c, '.' | '!' | '?'))
            .map_or(rest.len(), |(i, c)| {
                let after = i + c.len_utf8();
                // Include trailing whitespace with the sentence
                after + rest[after..].len() - rest[after..].trim_start().len()
            });
        let (sentence, tail) = rest.split_at(end);
        rest = tail;
        Some(sentence)
    })
}

/// Split a string into pieces of at most `max` bytes on char boundaries
fn hard_split(text: &str, max: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while rest.len() > max {
        let mut split_at = max;
        while !rest.is_char_boundary(split_at) {
            split_at -= 1;
        }
        let (piece, tail) = rest.split_at(split_at);
        pieces.push(piece);
        rest = tail;
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}

/// OpenAI TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}

#[async_trait]
impl TextToSpeech for OpenAITtsProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let voice = voice.unwrap_or(&self.config.default_voice);
        let chunks = Self::chunk_text(text);

        debug!(chunks = chunks.len(), voice = %voice, "Synthesizing speech");

        let mut audio = Vec::new();
        for chunk in &chunks {
            let bytes = self.synthesize_chunk(chunk, voice).await?;
            audio.extend_from_slice(&bytes);
        }

        debug!(audio_size = audio.len(), "Speech synthesis complete");

        Ok(AudioData::new(audio, self.config.output_format))
    }

    async fn is_available(&self) -> bool {
        let models_url = format!(
            "{}/models",
            self.config.openai_base_url.trim_end_matches('/')
        );

        match self
            .client
            .get(&models_url)
            .bearer_auth(self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("OpenAI TTS availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}
