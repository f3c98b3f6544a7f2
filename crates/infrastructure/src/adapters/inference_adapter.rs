//! Inference adapter - Implements InferencePort over the chat completion engine

use std::fmt;
use std::time::Instant;

use ai_core::{InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OpenAIChatEngine};
use application::error::ApplicationError;
use application::ports::{InferencePort, InferenceResult};
use async_trait::async_trait;
use domain::ChatMessage;
use tracing::{debug, instrument};

/// Adapter exposing the chat completion engine through the inference port
pub struct InferenceAdapter {
    engine: OpenAIChatEngine,
}

impl fmt::Debug for InferenceAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceAdapter")
            .field("model", &self.engine.default_model())
            .finish_non_exhaustive()
    }
}

impl InferenceAdapter {
    /// Create a new inference adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to initialize.
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OpenAIChatEngine::new(config).map_err(map_error)?;
        Ok(Self { engine })
    }
}

/// Map an inference error to an application error
fn map_error(err: InferenceError) -> ApplicationError {
    match err {
        InferenceError::Configuration(e) => ApplicationError::Configuration(e),
        InferenceError::RateLimited => ApplicationError::RateLimited,
        other => ApplicationError::Inference(other.to_string()),
    }
}

#[async_trait]
impl InferencePort for InferenceAdapter {
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    async fn generate(&self, messages: &[ChatMessage]) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();
        let response = self
            .engine
            .generate(InferenceRequest::from_messages(messages))
            .await
            .map_err(map_error)?;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        debug!(
            model = %response.model,
            latency_ms,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "Completion generated"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    async fn generate_json(
        &self,
        messages: &[ChatMessage],
    ) -> Result<serde_json::Value, ApplicationError> {
        let response = self
            .engine
            .generate(InferenceRequest::from_messages(messages).json_object())
            .await
            .map_err(map_error)?;

        serde_json::from_str(&response.content).map_err(|e| {
            ApplicationError::MalformedModelOutput(format!("Reply is not valid JSON: {e}"))
        })
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
