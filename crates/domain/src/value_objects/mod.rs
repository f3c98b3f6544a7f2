//! Value objects

pub mod audio_format;
pub mod book_id;
pub mod book_length;

pub use audio_format::AudioFormat;
pub use book_id::BookId;
pub use book_length::BookLength;
