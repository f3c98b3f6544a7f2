//! Audio container formats

use std::fmt;

use serde::{Deserialize, Serialize};

/// Audio container formats accepted for upload or produced by synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WAV (uncompressed)
    Wav,
    /// MP3
    Mp3,
    /// Ogg Vorbis/Opus
    Ogg,
    /// WebM (browser MediaRecorder default)
    Webm,
    /// M4A/AAC
    M4a,
}

impl AudioFormat {
    /// Map a MIME type to a format, if recognized
    pub fn from_mime(mime: &str) -> Option<Self> {
        // Browsers append codec parameters, e.g. "audio/webm;codecs=opus"
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence {
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/ogg" | "application/ogg" => Some(Self::Ogg),
            "audio/webm" | "video/webm" => Some(Self::Webm),
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Some(Self::M4a),
            _ => None,
        }
    }

    /// Canonical MIME type for this format
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
            Self::M4a => "audio/mp4",
        }
    }

    /// File extension (without dot)
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
            Self::M4a => "m4a",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
