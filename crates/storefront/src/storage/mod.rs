//! Durable key-value slots.
//!
//! The cart lives in a single slot keyed by a fixed name, holding its JSON
//! serialization. Slots are read once at startup and overwritten after
//! every mutation.
//!
//! # Backends
//!
//! - [`FileStorage`] - one file per slot inside a directory
//! - [`MemoryStorage`] - process-local map, for tests and ephemeral sessions

mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when reading or writing a slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value is not valid JSON for the requested type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A durable string slot store.
pub trait Storage: Send + Sync {
    /// Read a slot. `Ok(None)` means the slot was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON slot.
///
/// # Errors
///
/// Returns an error if the slot cannot be read or does not decode as `T`.
pub fn read_json<T: DeserializeOwned>(
    storage: &impl Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    storage
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Encode a value as JSON and overwrite the slot.
///
/// # Errors
///
/// Returns an error if encoding or the write fails.
pub fn write_json<T: Serialize>(
    storage: &impl Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}
