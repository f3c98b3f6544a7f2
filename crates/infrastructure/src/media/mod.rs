//! Media storage for generated audiobooks

mod fs_store;

pub use fs_store::FsMediaStore;
