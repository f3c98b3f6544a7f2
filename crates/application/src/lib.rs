//! Application layer - Use cases and orchestration
//!
//! Contains the two orchestrators (question answering and book generation)
//! and the port definitions their adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
