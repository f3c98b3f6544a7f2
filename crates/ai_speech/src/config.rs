//! Configuration for speech processing

use domain::AudioFormat;
use serde::{Deserialize, Serialize};

/// Configuration for speech processing services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Deepgram API key (for transcription)
    #[serde(default)]
    pub deepgram_api_key: Option<String>,

    /// Deepgram API base URL
    #[serde(default = "default_deepgram_base_url")]
    pub deepgram_base_url: String,

    /// Speech-to-text model
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Apply Deepgram smart formatting (punctuation, numerals)
    #[serde(default = "default_smart_format")]
    pub smart_format: bool,

    /// OpenAI API key (for synthesis)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL (for custom endpoints)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Default voice for TTS
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Output audio format for TTS
    #[serde(default = "default_output_format")]
    pub output_format: AudioFormat,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// TTS speaking speed (0.25 to 4.0)
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_deepgram_base_url() -> String {
    "https://api.deepgram.com".to_string()
}

fn default_stt_model() -> String {
    "nova-2".to_string()
}

const fn default_smart_format() -> bool {
    true
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_tts_model() -> String {
    "tts-1-hd".to_string()
}

fn default_voice() -> String {
    "shimmer".to_string()
}

const fn default_output_format() -> AudioFormat {
    AudioFormat::Mp3
}

const fn default_timeout_ms() -> u64 {
    60000 // 1 minute; chapter synthesis responses are large
}

const fn default_speed() -> f32 {
    1.0
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            deepgram_api_key: None,
            deepgram_base_url: default_deepgram_base_url(),
            stt_model: default_stt_model(),
            smart_format: default_smart_format(),
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            tts_model: default_tts_model(),
            default_voice: default_voice(),
            output_format: default_output_format(),
            timeout_ms: default_timeout_ms(),
            speed: default_speed(),
        }
    }
}

impl SpeechConfig {
    /// Create a minimal config for testing
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            deepgram_api_key: Some("test-deepgram-key".to_string()),
            openai_api_key: Some("test-openai-key".to_string()),
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.deepgram_api_key.as_deref().is_none_or(str::is_empty) {
            return Err("Deepgram API key is required for transcription".to_string());
        }

        if self.openai_api_key.as_deref().is_none_or(str::is_empty) {
            return Err("OpenAI API key is required for synthesis".to_string());
        }

        if !(0.25..=4.0).contains(&self.speed) {
            return Err(format!(
                "Speed must be between 0.25 and 4.0, got {}",
                self.speed
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
