//! Infrastructure - Adapters, storage and configuration
//!
//! Wires the application ports to their concrete backends: the chat
//! completion engine, the transcription and synthesis providers, and the
//! filesystem media store that holds generated audiobooks.

pub mod adapters;
pub mod config;
pub mod media;

pub use adapters::{InferenceAdapter, SpeechAdapter};
pub use config::{AppConfig, PromptConfig, ServerConfig, StorageConfig};
pub use media::FsMediaStore;
