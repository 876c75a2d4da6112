use async_trait::async_trait;
use desk_core::model::{Task, TaskId, sort_newest_first};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Fixed logical keys of the key-value collection, one per state slice.
///
/// Each key holds at most one value; writes replace it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KvKey {
    Notes,
    Exam,
}

impl KvKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            KvKey::Notes => "notes",
            KvKey::Exam => "exam",
        }
    }
}

impl fmt::Display for KvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository contract for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, newest `created_at` first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the tasks cannot be read.
    async fn list_tasks(&self) -> Result<Vec<Task>, StorageError>;

    /// Insert a brand-new task.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a task with the same id exists.
    async fn insert_task(&self, task: &Task) -> Result<(), StorageError>;

    /// Set the `done` flag of one task.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no task has this id.
    async fn set_done(&self, id: &TaskId, done: bool) -> Result<(), StorageError>;

    /// Delete one task.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no task has this id.
    async fn delete_task(&self, id: &TaskId) -> Result<(), StorageError>;
}

/// Repository contract for the key-value collection (notes, exam).
#[async_trait]
pub trait KvRepository: Send + Sync {
    /// Fetch the raw stored value for a key, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn get_value(&self, key: KvKey) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite the value for a key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put_value(&self, key: KvKey, value: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    tasks: Arc<Mutex<Vec<Task>>>,
    kv: Arc<Mutex<HashMap<KvKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let guard = self
            .tasks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut tasks = guard.clone();
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn insert_task(&self, task: &Task) -> Result<(), StorageError> {
        let mut guard = self
            .tasks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|t| t.id() == task.id()) {
            return Err(StorageError::Conflict);
        }
        // Front insertion keeps the latest insert first among equal timestamps.
        guard.insert(0, task.clone());
        Ok(())
    }

    async fn set_done(&self, id: &TaskId, done: bool) -> Result<(), StorageError> {
        let mut guard = self
            .tasks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let task = guard
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(StorageError::NotFound)?;
        task.set_done(done);
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StorageError> {
        let mut guard = self
            .tasks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let before = guard.len();
        guard.retain(|t| t.id() != id);
        if guard.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl KvRepository for InMemoryRepository {
    async fn get_value(&self, key: KvKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .kv
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn put_value(&self, key: KvKey, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .kv
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, value.to_owned());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub tasks: Arc<dyn TaskRepository>,
    pub kv: Arc<dyn KvRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let tasks: Arc<dyn TaskRepository> = Arc::new(repo.clone());
        let kv: Arc<dyn KvRepository> = Arc::new(repo);
        Self { tasks, kv }
    }
}
