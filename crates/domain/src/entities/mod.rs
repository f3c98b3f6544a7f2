//! Domain entities

pub mod chat_message;

pub use chat_message::{ChatMessage, MessageRole};
