//! Inference port - Interface for LLM chat completions

use async_trait::async_trait;
use domain::ChatMessage;

use crate::error::ApplicationError;

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated response content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Port for inference operations
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a free-text response for a conversation
    async fn generate(
        &self,
        messages: &[ChatMessage],
    ) -> Result<InferenceResult, ApplicationError>;

    /// Generate a response constrained to a single JSON object
    ///
    /// Fails with `MalformedModelOutput` if the model's reply does not
    /// parse as JSON.
    async fn generate_json(
        &self,
        messages: &[ChatMessage],
    ) -> Result<serde_json::Value, ApplicationError>;

    /// Check if the inference backend is healthy
    async fn is_healthy(&self) -> bool;

    /// Get the name of the current model
    fn current_model(&self) -> String;
}
