//! Local persistent key-value store used by the client when no backend is
//! wired in.
//!
//! The namespace is flat: string keys mapping to JSON-encoded string values.
//! Typed access goes through [`load_or_default`] and [`store_value`]; a
//! missing or unparsable value is never an error for readers, it is an
//! explicit [`Loaded`] branch carrying the caller's fallback.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LocalStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Flat string-keyed store, the desktop counterpart of browser local storage.
pub trait LocalStore: Send + Sync {
    /// Raw stored text for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `LocalStoreError` if the backing medium cannot be read.
    fn get_raw(&self, key: &str) -> Result<Option<String>, LocalStoreError>;

    /// Replace the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `LocalStoreError` if the value cannot be written.
    fn set_raw(&self, key: &str, value: String) -> Result<(), LocalStoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `LocalStoreError` if the change cannot be written.
    fn remove(&self, key: &str) -> Result<(), LocalStoreError>;
}

/// Keys used by the study desk, one per independently persisted slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Tasks,
    Notes,
    Exam,
    Focus,
    Subjects,
    Usp,
}

impl StoreKey {
    pub const ALL: [StoreKey; 6] = [
        StoreKey::Tasks,
        StoreKey::Notes,
        StoreKey::Exam,
        StoreKey::Focus,
        StoreKey::Subjects,
        StoreKey::Usp,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Tasks => "desk_tasks_v1",
            StoreKey::Notes => "desk_notes_v1",
            StoreKey::Exam => "desk_exam_v1",
            StoreKey::Focus => "desk_focus_v1",
            StoreKey::Subjects => "desk_subjects_v1",
            StoreKey::Usp => "desk_usp_v1",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a typed load. Every branch carries a usable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded<T> {
    /// Decoded from the stored value.
    Stored(T),
    /// Nothing stored (or an empty value); the fallback was used.
    Missing(T),
    /// The stored value could not be read or decoded; the fallback was used.
    Corrupt(T),
}

impl<T> Loaded<T> {
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Loaded::Stored(v) | Loaded::Missing(v) | Loaded::Corrupt(v) => v,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Loaded::Stored(_))
    }
}

/// Decode the value under `key`, substituting `fallback` when it is absent
/// or unreadable.
pub fn load_or_default<T: DeserializeOwned>(
    store: &dyn LocalStore,
    key: StoreKey,
    fallback: T,
) -> Loaded<T> {
    let raw = match store.get_raw(key.as_str()) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return Loaded::Missing(fallback),
        Err(err) => {
            tracing::warn!(%key, error = %err, "local store read failed; using default");
            return Loaded::Corrupt(fallback);
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Loaded::Stored(value),
        Err(err) => {
            tracing::warn!(%key, error = %err, "stored value is corrupt; using default");
            Loaded::Corrupt(fallback)
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `LocalStoreError` if serialization or the write fails.
pub fn store_value<T: Serialize + ?Sized>(
    store: &dyn LocalStore,
    key: StoreKey,
    value: &T,
) -> Result<(), LocalStoreError> {
    let raw = serde_json::to_string(value)?;
    store.set_raw(key.as_str(), raw)
}
