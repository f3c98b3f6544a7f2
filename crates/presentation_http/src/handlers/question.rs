//! Voice question handler
//!
//! Accepts a multipart upload with the recorded audio (`file`) and the
//! conversation so far (`messages`, a JSON-encoded array), and returns the
//! model's JSON reply together with the transcript.

use axum::{Json, extract::Multipart, extract::State};
use domain::{AudioFormat, ChatMessage};
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Question response body
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    /// The model's JSON reply
    pub data: serde_json::Value,
    /// Transcript of the uploaded audio
    pub transcription: String,
}

/// One parsed multipart upload
struct QuestionUpload {
    audio: Vec<u8>,
    format: AudioFormat,
    history: Vec<ChatMessage>,
}

/// Handle one voice question turn
#[instrument(skip(state, multipart))]
pub async fn ask_question(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<QuestionResponse>, ApiError> {
    let upload = parse_upload(multipart).await?;

    let outcome = state
        .question_service
        .ask(upload.audio, upload.format, upload.history)
        .await?;

    Ok(Json(QuestionResponse {
        data: outcome.reply,
        transcription: outcome.transcription,
    }))
}

/// Extract the audio and conversation history from the multipart body
async fn parse_upload(mut multipart: Multipart) -> Result<QuestionUpload, ApiError> {
    let mut audio: Option<(Vec<u8>, AudioFormat)> = None;
    let mut history: Option<Vec<ChatMessage>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                // MediaRecorder uploads carry a content type; absent one,
                // assume WAV
                let format = match field.content_type() {
                    Some(mime) => AudioFormat::from_mime(mime).ok_or_else(|| {
                        ApiError::BadRequest(format!("Unsupported audio format: {mime}"))
                    })?,
                    None => AudioFormat::Wav,
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read audio: {e}")))?;
                audio = Some((bytes.to_vec(), format));
            },
            Some("messages") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read messages: {e}")))?;
                let parsed: Vec<ChatMessage> = serde_json::from_str(&text).map_err(|e| {
                    ApiError::BadRequest(format!("messages is not a valid message array: {e}"))
                })?;
                history = Some(parsed);
            },
            _ => {},
        }
    }

    let (audio, format) =
        audio.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;
    if audio.is_empty() {
        return Err(ApiError::BadRequest("Audio upload is empty".to_string()));
    }
    let history =
        history.ok_or_else(|| ApiError::BadRequest("Missing 'messages' field".to_string()))?;

    Ok(QuestionUpload {
        audio,
        format,
        history,
    })
}
