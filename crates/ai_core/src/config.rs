//! Configuration for the chat completion client

use serde::{Deserialize, Serialize};

/// Configuration for the chat completion client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the completion API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key for bearer authentication
    #[serde(default)]
    pub api_key: Option<String>,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

const fn default_timeout_ms() -> u64 {
    120_000 // 2 minutes; chapter generation produces long completions
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl InferenceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.api_key.as_deref().is_none_or(str::is_empty) {
            return Err("api_key is required".to_string());
        }
        if self.default_model.is_empty() {
            return Err("default_model must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Config suitable for unit tests
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            api_key: Some("test-api-key".to_string()),
            ..Default::default()
        }
    }
}
