//! Book identifier for namespacing generated audio files
//!
//! Ids are 16 random characters drawn from `[0-9a-z]`. Uniqueness is
//! probabilistic (36^16 possible values), which is sufficient for scratch
//! file namespacing; there is no reservation or collision retry.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const ID_LEN: usize = 16;
const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A unique identifier for a generated book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(String);

impl BookId {
    /// Create a new random book ID
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..ID_LEN)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect();
        Self(id)
    }

    /// Parse a book ID from a string, validating format
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.len() == ID_LEN && s.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::InvalidBookId(s.to_string()))
        }
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scratch filename for a chapter of this book
    pub fn chapter_filename(&self, index: usize) -> String {
        format!("{}_{index}.mp3", self.0)
    }

    /// Filename of the merged book audio
    pub fn merged_filename(&self) -> String {
        format!("{}_final.mp3", self.0)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
