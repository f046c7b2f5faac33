//! Process-local slots.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{Storage, StorageError};

/// Slots held in a shared map.
///
/// Clones share the same slots, which lets a test inspect what a store
/// persisted or open a second store over the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<MemoryData>>,
}

#[derive(Debug, Default)]
struct MemoryData {
    slots: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every write with [`StorageError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .read_only = read_only;
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if data.read_only {
            return Err(StorageError::Unavailable(format!("slot {key} is read-only")));
        }
        data.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
