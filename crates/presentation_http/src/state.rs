//! Application state shared across handlers

use std::fmt;
use std::sync::Arc;

use application::ports::MediaStorePort;
use application::{BookService, QuestionService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Service for the voice question loop
    pub question_service: Arc<QuestionService>,
    /// Service for audiobook generation
    pub book_service: Arc<BookService>,
    /// Media store, for scheduling removal of finished books
    pub media_store: Arc<dyn MediaStorePort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("question_service", &self.question_service)
            .field("book_service", &self.book_service)
            .finish_non_exhaustive()
    }
}
