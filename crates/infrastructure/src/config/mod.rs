//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `storage`: media directory, cleanup and synthesis pipeline settings
//! - `prompts`: model prompts for the question loop and TOC planning
//!
//! Inference and speech settings live with their crates and are embedded
//! here as sections.

mod prompts;
mod server;
mod storage;

use std::fmt;
use std::str::FromStr;

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

pub use prompts::PromptConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat completion configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Transcription and synthesis configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Media storage and pipeline configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Model prompts
    #[serde(default)]
    pub prompts: PromptConfig,
}

impl AppConfig {
    /// Load configuration from an optional `config` file and the environment
    ///
    /// Environment variables override file values and use `__` as the
    /// section separator, e.g. `FABLECAST_SPEECH__DEEPGRAM_API_KEY`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("FABLECAST")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.inference
            .validate()
            .map_err(|e| format!("inference: {e}"))?;
        self.speech.validate().map_err(|e| format!("speech: {e}"))?;
        self.storage
            .validate()
            .map_err(|e| format!("storage: {e}"))?;
        self.prompts
            .validate()
            .map_err(|e| format!("prompts: {e}"))?;
        Ok(())
    }
}
