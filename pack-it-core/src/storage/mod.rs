//! Local key-value persistence.
//!
//! The list store snapshots itself into a synchronous key-value store after
//! every mutation. Values are JSON strings.

mod file;
mod memory;

use std::io;
use std::path::PathBuf;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Synchronous key-value storage backing the store snapshot and the auth session.
pub trait KeyValueStorage: Send + Sync {
    /// Returns `Ok(None)` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Errors that can occur during key-value storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error for {}: {1}", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}
