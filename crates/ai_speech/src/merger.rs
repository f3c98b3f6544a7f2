//! Audio merger for assembling chapter clips
//!
//! Concatenates per-chapter audio files into a single output file using
//! FFmpeg's concat filter. FFmpeg must be installed on the system.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::SpeechError;

/// Merges ordered audio files into one output file
#[derive(Debug, Clone, Default)]
pub struct AudioMerger {
    /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
    ffmpeg_path: Option<String>,
}

impl AudioMerger {
    /// Create a new merger with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self { ffmpeg_path: None }
    }

    /// Create a new merger with a custom FFmpeg path
    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: Some(path.into()),
        }
    }

    /// Get the FFmpeg binary path
    fn ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check if FFmpeg is available on the system
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_path())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Build the FFmpeg argument list for a concat run
    ///
    /// One `-i` per input in order, then a concat filter over all of them.
    fn build_args(inputs: &[PathBuf], output: &Path) -> Vec<String> {
        let mut args = Vec::new();
        for input in inputs {
            args.push("-i".to_string());
            args.push(input.to_string_lossy().into_owned());
        }
        args.push("-filter_complex".to_string());
        args.push(format!("concat=n={}:v=0:a=1", inputs.len()));
        args.push("-y".to_string());
        args.push("-loglevel".to_string());
        args.push("error".to_string());
        args.push(output.to_string_lossy().into_owned());
        args
    }

    /// Merge the given audio files, in order, into `output`
    ///
    /// # Errors
    ///
    /// Returns an error if the input list is empty, FFmpeg cannot be
    /// spawned, or the merge exits with a failure status.
    #[instrument(skip(self, inputs, output), fields(inputs = inputs.len()))]
    pub async fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<(), SpeechError> {
        if inputs.is_empty() {
            return Err(SpeechError::AudioProcessing(
                "No input files to merge".to_string(),
            ));
        }

        debug!(output = %output.display(), "Merging audio files");

        let result = Command::new(self.ffmpeg_path())
            .args(Self::build_args(inputs, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to spawn FFmpeg: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(SpeechError::AudioProcessing(format!(
                "FFmpeg merge failed: {stderr}"
            )));
        }

        debug!("Merge complete");
        Ok(())
    }
}
