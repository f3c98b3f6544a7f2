//! AI Speech - Transcription, synthesis and audio merging
//!
//! Speech-to-text via the Deepgram pre-recorded API, text-to-speech via the
//! OpenAI speech API, and FFmpeg-based merging of per-chapter audio clips.

pub mod config;
pub mod error;
pub mod merger;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use merger::AudioMerger;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::{DeepgramTranscriber, OpenAITtsProvider};
pub use types::{AudioData, Transcription};
