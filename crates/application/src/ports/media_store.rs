//! Media store port - Interface for chapter audio storage and assembly

use async_trait::async_trait;
use domain::BookId;

use crate::error::ApplicationError;

/// Port for storing chapter audio and assembling the final book file
#[async_trait]
pub trait MediaStorePort: Send + Sync {
    /// Store one chapter's audio under the book's scratch namespace
    async fn store_chapter(
        &self,
        book_id: &BookId,
        index: usize,
        audio: Vec<u8>,
    ) -> Result<(), ApplicationError>;

    /// Merge all stored chapters, in index order, into the final file
    ///
    /// Deletes the chapter scratch files after a successful merge and
    /// returns the merged file's name.
    async fn merge_chapters(
        &self,
        book_id: &BookId,
        chapter_count: usize,
    ) -> Result<String, ApplicationError>;

    /// Remove a book's scratch chapter files without merging them
    ///
    /// Used to reclaim disk space when the pipeline aborts after chapters
    /// were written. Chapters that were never stored are ignored.
    async fn discard_chapters(
        &self,
        book_id: &BookId,
        chapter_count: usize,
    ) -> Result<(), ApplicationError>;

    /// Record that the given file should be removed after the configured TTL
    ///
    /// The record is durable: deletion happens even if the process restarts
    /// before the TTL elapses.
    async fn schedule_removal(&self, filename: &str) -> Result<(), ApplicationError>;
}
