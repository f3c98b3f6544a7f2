//! API error handling
//!
//! Maps application errors to HTTP status codes with a stable JSON body.
//! Internal errors never expose their message to the client.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Rate limit exceeded".to_string(),
            ),
            Self::UpstreamError(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg),
            Self::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            },
            Self::Internal(msg) => {
                // Storage paths and config details stay out of responses
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::MalformedModelOutput(msg) => Self::UpstreamError(msg),
            ApplicationError::Inference(msg) | ApplicationError::Speech(msg) => {
                Self::ServiceUnavailable(msg)
            },
            ApplicationError::Storage(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    #[test]
    fn domain_errors_convert_to_bad_request() {
        let source = ApplicationError::Domain(DomainError::InvalidBookLength(5));
        let result: ApiError = source.into();
        let ApiError::BadRequest(msg) = result else {
            unreachable!("Expected BadRequest");
        };
        assert!(msg.contains("5 minutes"));
    }

    #[test]
    fn rate_limited_converts() {
        let result: ApiError = ApplicationError::RateLimited.into();
        assert!(matches!(result, ApiError::RateLimited));
    }

    #[test]
    fn malformed_output_converts_to_upstream_error() {
        let source = ApplicationError::MalformedModelOutput("not json".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::UpstreamError(_)));
    }

    #[test]
    fn inference_and_speech_convert_to_service_unavailable() {
        let result: ApiError = ApplicationError::Inference("model down".to_string()).into();
        assert!(matches!(result, ApiError::ServiceUnavailable(_)));

        let result: ApiError = ApplicationError::Speech("stt down".to_string()).into();
        assert!(matches!(result, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn storage_converts_to_internal() {
        let result: ApiError = ApplicationError::Storage("disk full".to_string()).into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[test]
    fn into_response_statuses() {
        let cases = [
            (
                ApiError::BadRequest("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (
                ApiError::UpstreamError("x".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::ServiceUnavailable("x".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::Internal("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn internal_error_body_hides_the_message() {
        let response = ApiError::Internal("/var/lib/secret/path".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            error: "Bad request".to_string(),
            code: "bad_request".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"error\""));
        assert!(json.contains("\"code\""));
    }
}
