//! Audiobook generation handler

use axum::{Json, extract::State};
use domain::BookLength;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Book generation request body
#[derive(Debug, Deserialize)]
pub struct GenerateBookRequest {
    /// JSON-encoded conversation history the topic is derived from
    pub messages: String,
    /// Requested length in minutes (3, 10 or 30)
    pub time: u8,
}

/// Book generation response body
#[derive(Debug, Serialize)]
pub struct GenerateBookResponse {
    /// Filename of the merged audio, served under /resources
    pub data: String,
}

/// Generate a complete audiobook from the conversation
#[instrument(skip(state, request), fields(time = request.time))]
pub async fn generate_book(
    State(state): State<AppState>,
    Json(request): Json<GenerateBookRequest>,
) -> Result<Json<GenerateBookResponse>, ApiError> {
    if request.messages.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "messages cannot be empty".to_string(),
        ));
    }

    let length = BookLength::try_from(request.time)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let book = state.book_service.generate(&request.messages, length).await?;

    // The book itself succeeded; a failed cleanup registration is not worth
    // discarding it over, the file just has to be reclaimed manually
    if let Err(e) = state.media_store.schedule_removal(&book.filename).await {
        warn!(file = %book.filename, error = %e, "Failed to schedule media removal");
    }

    Ok(Json(GenerateBookResponse {
        data: book.filename,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_from_client_json() {
        let json = r#"{"messages": "[{\"role\":\"user\",\"content\":\"whales\"}]", "time": 10}"#;
        let request: GenerateBookRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.time, 10);
        assert!(request.messages.contains("whales"));
    }

    #[test]
    fn request_rejects_non_numeric_time() {
        let json = r#"{"messages": "[]", "time": "ten"}"#;
        assert!(serde_json::from_str::<GenerateBookRequest>(json).is_err());
    }

    #[test]
    fn response_serialization() {
        let resp = GenerateBookResponse {
            data: "a1b2c3d4e5f6g7h8_final.mp3".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"data":"a1b2c3d4e5f6g7h8_final.mp3"}"#);
    }
}
