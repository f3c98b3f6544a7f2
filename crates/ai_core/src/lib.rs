//! AI Core - Chat completion client
//!
//! Provides abstractions for LLM chat completions against an
//! OpenAI-compatible API, including JSON-object response mode for
//! structured output.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAIChatEngine;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
