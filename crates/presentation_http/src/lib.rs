//! Fablecast HTTP presentation layer
//!
//! This crate provides the HTTP API: the voice question loop and the
//! audiobook generation endpoint, plus static serving of generated audio.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use tasks::spawn_audio_cleanup_task;
