//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let storage = &state.config.storage;
    let server = &state.config.server;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Voice question loop (multipart audio upload)
        .route(
            "/api/question",
            post(handlers::question::ask_question)
                .layer(DefaultBodyLimit::max(server.max_body_size_audio_bytes)),
        )
        // Audiobook generation
        .route(
            "/api/book",
            post(handlers::book::generate_book)
                .layer(DefaultBodyLimit::max(server.max_body_size_json_bytes)),
        )
        // Generated audio files
        .nest_service("/resources", ServeDir::new(&storage.media_dir))
        // Attach state
        .with_state(state)
}
