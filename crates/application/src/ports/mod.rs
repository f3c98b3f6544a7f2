//! Port definitions for the application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement them.

mod inference_port;
mod media_store;
mod speech_port;

pub use inference_port::{InferencePort, InferenceResult};
pub use media_store::MediaStorePort;
pub use speech_port::{SpeechPort, SynthesisResult, TranscriptionResult};
