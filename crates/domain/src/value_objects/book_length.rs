//! Supported book lengths
//!
//! The length selector is a closed set. Anything outside {3, 10, 30}
//! minutes is rejected at the boundary rather than silently mapped to the
//! longest book.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Target duration of a generated book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookLength {
    /// Roughly three minutes: a single chapter, no table of contents
    Minutes3,
    /// Roughly ten minutes: three chapters
    Minutes10,
    /// Roughly thirty minutes: ten chapters
    Minutes30,
}

impl BookLength {
    /// Number of chapters generated for this length
    pub const fn chapter_count(self) -> usize {
        match self {
            Self::Minutes3 => 1,
            Self::Minutes10 => 3,
            Self::Minutes30 => 10,
        }
    }

    /// Whether a table of contents is derived before chapter generation
    pub const fn uses_table_of_contents(self) -> bool {
        !matches!(self, Self::Minutes3)
    }

    /// Duration in minutes
    pub const fn minutes(self) -> u8 {
        match self {
            Self::Minutes3 => 3,
            Self::Minutes10 => 10,
            Self::Minutes30 => 30,
        }
    }
}

impl TryFrom<u8> for BookLength {
    type Error = DomainError;

    fn try_from(minutes: u8) -> Result<Self, Self::Error> {
        match minutes {
            3 => Ok(Self::Minutes3),
            10 => Ok(Self::Minutes10),
            30 => Ok(Self::Minutes30),
            other => Err(DomainError::InvalidBookLength(other)),
        }
    }
}
