use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::{LocalStore, LocalStoreError};

/// Ephemeral store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns `LocalStoreError::Poisoned` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, LocalStoreError> {
        let guard = self.entries.lock().map_err(|_| LocalStoreError::Poisoned)?;
        Ok(guard.len())
    }

    /// # Errors
    ///
    /// Returns `LocalStoreError::Poisoned` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, LocalStoreError> {
        self.len().map(|n| n == 0)
    }
}

impl LocalStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let guard = self.entries.lock().map_err(|_| LocalStoreError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), LocalStoreError> {
        let mut guard = self.entries.lock().map_err(|_| LocalStoreError::Poisoned)?;
        guard.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let mut guard = self.entries.lock().map_err(|_| LocalStoreError::Poisoned)?;
        guard.remove(key);
        Ok(())
    }
}
