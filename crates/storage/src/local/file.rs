use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{LocalStore, LocalStoreError};

/// Store backed by a single JSON object file.
///
/// The whole namespace is cached in memory and rewritten on every change
/// (write to a sibling temp file, then rename).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// An unreadable or malformed file is treated as an empty store so the
    /// desk still starts; the bad file is overwritten on the next write.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "local store file unreadable; starting empty");
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), LocalStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, LocalStoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(&content)?)
}

impl LocalStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let guard = self.entries.lock().map_err(|_| LocalStoreError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), LocalStoreError> {
        let mut guard = self.entries.lock().map_err(|_| LocalStoreError::Poisoned)?;
        guard.insert(key.to_owned(), value);
        self.flush(&guard)
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let mut guard = self.entries.lock().map_err(|_| LocalStoreError::Poisoned)?;
        if guard.remove(key).is_some() {
            self.flush(&guard)?;
        }
        Ok(())
    }
}
