//! Application services

pub mod book_service;
pub mod question_service;

pub use book_service::{BookService, GeneratedBook};
pub use question_service::{QuestionOutcome, QuestionService};
