//! Background tasks

mod audio_cleanup;

pub use audio_cleanup::spawn_audio_cleanup_task;
