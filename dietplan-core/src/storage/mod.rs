//! Durable key-value persistence for state slices.
//!
//! The store keeps one entry per [`SliceKey`], holding the slice serialized
//! as JSON. Two backends are provided:
//! - [`FileStore`]: `<key>.json` files under a data directory
//! - [`MemoryStore`]: a mutex-guarded map, used in tests
//!
//! There is no atomicity across keys.

mod file;
mod memory;
mod slice;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use slice::SliceKey;

/// Errors that can occur while reading or writing the key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Minimal key-value contract used by the state store.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}
