//! Domain layer - Core entities, value objects and domain errors
//!
//! This crate has no I/O and no async code. It defines the vocabulary the
//! rest of the workspace speaks: conversation messages, book identifiers,
//! book lengths and audio formats.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{ChatMessage, MessageRole};
pub use errors::DomainError;
pub use value_objects::{AudioFormat, BookId, BookLength};
