//! Speech service providers

pub mod deepgram;
pub mod openai;

pub use deepgram::DeepgramTranscriber;
pub use openai::OpenAITtsProvider;
