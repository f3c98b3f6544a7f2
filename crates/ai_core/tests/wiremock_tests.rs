//! HTTP-level tests for the chat completion engine

use ai_core::{InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OpenAIChatEngine};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_for(mock_server: &MockServer) -> OpenAIChatEngine {
    let config = InferenceConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-api-key".to_string()),
        ..Default::default()
    };
    OpenAIChatEngine::new(config).unwrap()
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19 }
    })
}

#[tokio::test]
async fn generate_returns_first_choice() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello!")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let response = engine.generate(InferenceRequest::simple("Hi")).await.unwrap();

    assert_eq!(response.content, "Hello!");
    assert_eq!(response.model, "gpt-4o");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 19);
}

#[tokio::test]
async fn json_mode_sends_response_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "response_format": { "type": "json_object" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body(r#"{"question":"Why?"}"#)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let response = engine
        .generate(InferenceRequest::simple("Ask me something").json_object())
        .await
        .unwrap();

    assert_eq!(response.content, r#"{"question":"Why?"}"#);
}

#[tokio::test]
async fn request_carries_full_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "messages": [
                { "role": "system", "content": "Be brief" },
                { "role": "user", "content": "Hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let history = vec![
        domain::ChatMessage::system("Be brief"),
        domain::ChatMessage::user("Hi"),
    ];
    let response = engine
        .generate(InferenceRequest::from_messages(&history))
        .await
        .unwrap();

    assert_eq!(response.content, "Ok");
}

#[tokio::test]
async fn rate_limit_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {
                "message": "Rate limit exceeded",
                "type": "rate_limit_error",
                "code": "rate_limit_exceeded"
            }
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(matches!(result, Err(InferenceError::RateLimited)));
}

#[tokio::test]
async fn missing_model_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {
                "message": "The model does not exist",
                "type": "invalid_request_error",
                "code": "model_not_found"
            }
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(matches!(result, Err(InferenceError::ModelNotAvailable(_))));
}

#[tokio::test]
async fn empty_choices_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "gpt-4o",
            "choices": []
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let result = engine.generate(InferenceRequest::simple("Hi")).await;

    assert!(matches!(result, Err(InferenceError::InvalidResponse(_))));
}

#[tokio::test]
async fn health_check_reports_api_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    assert!(engine.health_check().await.unwrap());
}
