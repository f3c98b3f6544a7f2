//! Port adapters for external AI services

mod inference_adapter;
mod speech_adapter;

pub use inference_adapter::InferenceAdapter;
pub use speech_adapter::SpeechAdapter;
