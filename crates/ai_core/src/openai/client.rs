//! OpenAI chat completions client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};

/// Chat completion engine backed by an OpenAI-compatible API
#[derive(Debug, Clone)]
pub struct OpenAIChatEngine {
    client: Client,
    config: InferenceConfig,
}

impl OpenAIChatEngine {
    /// Create a new engine
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized chat completion engine"
        );

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }
}

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [crate::ports::InferenceMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}

impl OpenAIChatEngine {
    fn classify_error(&self, status: reqwest::StatusCode, body: &str) -> InferenceError {
        if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
            return match api_error.error.code.as_deref() {
                Some("rate_limit_exceeded") => InferenceError::RateLimited,
                Some("model_not_found") => {
                    InferenceError::ModelNotAvailable(self.config.default_model.clone())
                },
                _ => InferenceError::ServerError(api_error.error.message),
            };
        }
        InferenceError::ServerError(format!("Status {status}: {body}"))
    }
}

#[async_trait]
impl InferenceEngine for OpenAIChatEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request), messages = request.messages.len()))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request).to_string();

        let body = ChatCompletionRequest {
            model: &model,
            messages: &request.messages,
            temperature: request.temperature.or(self.config.temperature),
            max_tokens: request.max_tokens.or(self.config.max_tokens),
            response_format: request.json_output.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        debug!("Sending chat completion request");

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(self.api_key())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Chat completion request failed");
            return Err(self.classify_error(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("No choices returned".to_string()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| InferenceError::InvalidResponse("Empty message content".to_string()))?;

        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(tokens = ?usage, "Chat completion finished");

        Ok(InferenceResponse {
            content,
            model: completion.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_creates_correct_urls() {
        let engine = OpenAIChatEngine::new(InferenceConfig::test()).unwrap();

        assert_eq!(
            engine.api_url("chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(engine.api_url("/models"), "https://api.openai.com/v1/models");
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let config = InferenceConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..InferenceConfig::test()
        };
        let engine = OpenAIChatEngine::new(config).unwrap();
        assert_eq!(
            engine.api_url("chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn new_fails_without_api_key() {
        let result = OpenAIChatEngine::new(InferenceConfig::default());
        assert!(matches!(result, Err(InferenceError::Configuration(_))));
    }

    #[test]
    fn default_model_comes_from_config() {
        let engine = OpenAIChatEngine::new(InferenceConfig::test()).unwrap();
        assert_eq!(engine.default_model(), "gpt-4o");
    }

    #[test]
    fn request_model_overrides_the_default() {
        let engine = OpenAIChatEngine::new(InferenceConfig::test()).unwrap();

        let request = InferenceRequest::simple("hi").with_model("gpt-4o-mini");
        assert_eq!(engine.resolve_model(&request), "gpt-4o-mini");

        let request = InferenceRequest::simple("hi");
        assert_eq!(engine.resolve_model(&request), "gpt-4o");
    }

    #[test]
    fn json_output_adds_response_format() {
        let request = InferenceRequest::simple("hi").json_object();
        let body = ChatCompletionRequest {
            model: "gpt-4o",
            messages: &request.messages,
            temperature: None,
            max_tokens: None,
            response_format: request.json_output.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""response_format":{"type":"json_object"}"#));
    }
}
