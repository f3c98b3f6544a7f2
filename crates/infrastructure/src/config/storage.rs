//! Media storage and book generation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for media storage and the synthesis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where generated audio files are stored and served from
    #[serde(default = "default_media_dir")]
    pub media_dir: String,

    /// How long a finished audiobook stays on disk before removal
    #[serde(default = "default_cleanup_ttl_secs")]
    pub cleanup_ttl_secs: u64,

    /// Interval between cleanup sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Number of chapters synthesized concurrently
    #[serde(default = "default_synthesis_concurrency")]
    pub synthesis_concurrency: usize,
}

fn default_media_dir() -> String {
    "./resources".to_string()
}

const fn default_cleanup_ttl_secs() -> u64 {
    2 * 60 * 60 // 2 hours
}

const fn default_sweep_interval_secs() -> u64 {
    5 * 60
}

const fn default_synthesis_concurrency() -> usize {
    1
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
            cleanup_ttl_secs: default_cleanup_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            synthesis_concurrency: default_synthesis_concurrency(),
        }
    }
}

impl StorageConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.media_dir.is_empty() {
            return Err("media_dir must not be empty".to_string());
        }
        if self.cleanup_ttl_secs == 0 {
            return Err("cleanup_ttl_secs must be greater than zero".to_string());
        }
        if self.sweep_interval_secs == 0 {
            return Err("sweep_interval_secs must be greater than zero".to_string());
        }
        if self.synthesis_concurrency == 0 {
            return Err("synthesis_concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}
