//! Filesystem media store
//!
//! Stores per-chapter audio as scratch files, merges them into the final
//! audiobook with FFmpeg, and tracks removal deadlines in sidecar files so
//! that cleanup survives a process restart.

use std::fmt;
use std::path::{Path, PathBuf};

use ai_speech::AudioMerger;
use application::error::ApplicationError;
use application::ports::MediaStorePort;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::BookId;
use tracing::{debug, info, instrument, warn};

/// Suffix of the sidecar file that records a removal deadline
const EXPIRY_SUFFIX: &str = ".expires";

/// Media store backed by a directory on the local filesystem
pub struct FsMediaStore {
    media_dir: PathBuf,
    cleanup_ttl_secs: u64,
    merger: AudioMerger,
}

impl fmt::Debug for FsMediaStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsMediaStore")
            .field("media_dir", &self.media_dir)
            .field("cleanup_ttl_secs", &self.cleanup_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl FsMediaStore {
    /// Create a new store rooted at `media_dir`
    pub fn new(media_dir: impl Into<PathBuf>, cleanup_ttl_secs: u64) -> Self {
        Self {
            media_dir: media_dir.into(),
            cleanup_ttl_secs,
            merger: AudioMerger::new(),
        }
    }

    /// Create a store with a custom audio merger
    pub fn with_merger(
        media_dir: impl Into<PathBuf>,
        cleanup_ttl_secs: u64,
        merger: AudioMerger,
    ) -> Self {
        Self {
            media_dir: media_dir.into(),
            cleanup_ttl_secs,
            merger,
        }
    }

    /// The directory served to clients
    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Ensure the media directory exists
    pub async fn init(&self) -> Result<(), ApplicationError> {
        tokio::fs::create_dir_all(&self.media_dir)
            .await
            .map_err(|e| {
                ApplicationError::Storage(format!(
                    "Failed to create media directory {}: {e}",
                    self.media_dir.display()
                ))
            })
    }

    /// Delete every file whose removal deadline has passed
    ///
    /// Scans the media directory for sidecar files, removing each overdue
    /// file together with its sidecar. A sidecar that does not parse is
    /// treated as overdue. Returns the number of files removed.
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self) -> Result<usize, ApplicationError> {
        let mut entries = tokio::fs::read_dir(&self.media_dir).await.map_err(|e| {
            ApplicationError::Storage(format!(
                "Failed to read media directory {}: {e}",
                self.media_dir.display()
            ))
        })?;

        let now = Utc::now();
        let mut removed = 0;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let sidecar = entry.path();
            let Some(name) = sidecar.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(target_name) = name.strip_suffix(EXPIRY_SUFFIX) else {
                continue;
            };

            if self.is_due(&sidecar, now).await {
                let target = self.media_dir.join(target_name);
                remove_if_present(&target).await;
                remove_if_present(&sidecar).await;
                removed += 1;
                debug!(file = target_name, "Removed expired media file");
            }
        }

        if removed > 0 {
            info!(removed, "Media cleanup sweep complete");
        }
        Ok(removed)
    }

    /// Whether the deadline recorded in `sidecar` has passed
    async fn is_due(&self, sidecar: &Path, now: DateTime<Utc>) -> bool {
        match tokio::fs::read_to_string(sidecar).await {
            Ok(contents) => match DateTime::parse_from_rfc3339(contents.trim()) {
                Ok(deadline) => deadline <= now,
                Err(e) => {
                    warn!(sidecar = %sidecar.display(), error = %e, "Unreadable removal deadline, treating as overdue");
                    true
                },
            },
            // Already removed by a concurrent sweep
            Err(_) => false,
        }
    }
}

/// Remove a file, ignoring the case where it is already gone
async fn remove_if_present(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove media file");
        }
    }
}

#[async_trait]
impl MediaStorePort for FsMediaStore {
    #[instrument(skip(self, audio), fields(book_id = %book_id, index, audio_bytes = audio.len()))]
    async fn store_chapter(
        &self,
        book_id: &BookId,
        index: usize,
        audio: Vec<u8>,
    ) -> Result<(), ApplicationError> {
        let path = self.media_dir.join(book_id.chapter_filename(index));
        tokio::fs::write(&path, audio).await.map_err(|e| {
            ApplicationError::Storage(format!(
                "Failed to write chapter file {}: {e}",
                path.display()
            ))
        })
    }

    #[instrument(skip(self), fields(book_id = %book_id, chapter_count))]
    async fn merge_chapters(
        &self,
        book_id: &BookId,
        chapter_count: usize,
    ) -> Result<String, ApplicationError> {
        let inputs: Vec<PathBuf> = (0..chapter_count)
            .map(|idx| self.media_dir.join(book_id.chapter_filename(idx)))
            .collect();
        let merged_name = book_id.merged_filename();
        let output = self.media_dir.join(&merged_name);

        self.merger
            .merge(&inputs, &output)
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;

        for input in &inputs {
            tokio::fs::remove_file(input).await.map_err(|e| {
                ApplicationError::Storage(format!(
                    "Failed to remove chapter file {}: {e}",
                    input.display()
                ))
            })?;
        }

        debug!(file = %merged_name, "Chapters merged");
        Ok(merged_name)
    }

    #[instrument(skip(self), fields(book_id = %book_id, chapter_count))]
    async fn discard_chapters(
        &self,
        book_id: &BookId,
        chapter_count: usize,
    ) -> Result<(), ApplicationError> {
        for index in 0..chapter_count {
            remove_if_present(&self.media_dir.join(book_id.chapter_filename(index))).await;
        }
        debug!("Scratch chapters discarded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn schedule_removal(&self, filename: &str) -> Result<(), ApplicationError> {
        if filename.contains(['/', '\\']) || filename.contains("..") {
            return Err(ApplicationError::Storage(format!(
                "Refusing to schedule removal outside the media directory: {filename}"
            )));
        }

        let deadline = Utc::now() + Duration::seconds(i64::try_from(self.cleanup_ttl_secs).unwrap_or(i64::MAX));
        let sidecar = self.media_dir.join(format!("{filename}{EXPIRY_SUFFIX}"));

        tokio::fs::write(&sidecar, deadline.to_rfc3339())
            .await
            .map_err(|e| {
                ApplicationError::Storage(format!(
                    "Failed to record removal deadline for {filename}: {e}"
                ))
            })?;

        debug!(filename, deadline = %deadline, "Removal scheduled");
        Ok(())
    }
}
