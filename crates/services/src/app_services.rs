use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::state_service::StateService;
use crate::task_service::TaskService;

/// Assembles the backend-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    tasks: Arc<TaskService>,
    state: Arc<StateService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        tracing::info!(db_url, "sqlite storage ready");
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services over ephemeral in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            tasks: Arc::new(TaskService::new(clock, Arc::clone(&storage.tasks))),
            state: Arc::new(StateService::new(Arc::clone(&storage.kv))),
        }
    }

    #[must_use]
    pub fn tasks(&self) -> Arc<TaskService> {
        Arc::clone(&self.tasks)
    }

    #[must_use]
    pub fn state(&self) -> Arc<StateService> {
        Arc::clone(&self.state)
    }
}
