//! Durable client-local key-value storage.
//!
//! The client keeps a handful of small preferences (currently only the
//! selected language) between runs. Backends implement [`KeyValueStore`];
//! callers treat every failure as non-fatal.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage document is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage is unavailable")]
    Unavailable,
}

/// Minimal string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    /// Returns an error if the value could not be made durable.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
