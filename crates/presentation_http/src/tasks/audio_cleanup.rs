//! Media cleanup task
//!
//! Periodically sweeps the media directory, deleting generated audio files
//! whose removal deadline has passed. Deadlines are recorded on disk, so
//! files scheduled before a restart are still picked up.

use std::sync::Arc;
use std::time::Duration;

use infrastructure::FsMediaStore;
use tracing::{debug, error, info};

/// Spawn a background task that periodically removes expired media files.
///
/// Returns a `JoinHandle` that can be used to abort the task on shutdown.
pub fn spawn_audio_cleanup_task(
    media_store: Arc<FsMediaStore>,
    sweep_interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        interval_secs = sweep_interval.as_secs(),
        "Starting media cleanup task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        // The startup sweep already ran; skip the immediate tick
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match media_store.sweep_expired().await {
                Ok(removed) => {
                    if removed > 0 {
                        info!(removed, "Removed expired media files");
                    } else {
                        debug!("No expired media files");
                    }
                },
                Err(e) => {
                    error!(error = %e, "Media cleanup sweep failed");
                },
            }
        }
    })
}
