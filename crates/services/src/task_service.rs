use std::sync::Arc;

use desk_core::model::{Task, TaskError, TaskId};
use storage::repository::TaskRepository;

use crate::Clock;
use crate::error::TaskServiceError;

/// Backend task CRUD over a `TaskRepository`.
#[derive(Clone)]
pub struct TaskService {
    clock: Clock,
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    #[must_use]
    pub fn new(clock: Clock, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { clock, tasks }
    }

    /// All tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::Storage` if repository access fails.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.tasks.list_tasks().await?)
    }

    /// Create a task with a fresh id stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::Task` if the title is blank.
    /// Returns `TaskServiceError::Storage` if persistence fails.
    pub async fn create_task(&self, title: &str) -> Result<Task, TaskServiceError> {
        let task = Task::new(TaskId::generate(), title, self.clock.now_millis())?;
        self.tasks.insert_task(&task).await?;
        tracing::debug!(id = %task.id(), "task created");
        Ok(task)
    }

    /// Set the completion flag of an existing task.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::Storage` with `StorageError::NotFound` for an unknown id.
    pub async fn set_done(&self, id: &TaskId, done: bool) -> Result<(), TaskServiceError> {
        if id.as_str().trim().is_empty() {
            return Err(TaskError::EmptyId.into());
        }
        self.tasks.set_done(id, done).await?;
        tracing::debug!(%id, done, "task updated");
        Ok(())
    }

    /// Remove a task.
    ///
    /// # Errors
    ///
    /// Returns `TaskServiceError::Storage` with `StorageError::NotFound` for an unknown id.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), TaskServiceError> {
        self.tasks.delete_task(id).await?;
        tracing::debug!(%id, "task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, StorageError};

    fn service() -> TaskService {
        TaskService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn create_stamps_clock_time_and_trims() {
        let svc = service();
        let task = svc.create_task("  Past paper  ").await.unwrap();
        assert_eq!(task.title(), "Past paper");
        assert!(!task.is_done());
        assert_eq!(task.created_at(), fixed_now().timestamp_millis());

        let listed = svc.list_tasks().await.unwrap();
        assert_eq!(listed, vec![task]);
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_storage() {
        let svc = service();
        let err = svc.create_task("   ").await.unwrap_err();
        assert!(matches!(err, TaskServiceError::Task(TaskError::EmptyTitle)));
        assert!(svc.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let svc = service();
        let missing = TaskId::new("nope");
        assert!(matches!(
            svc.set_done(&missing, true).await,
            Err(TaskServiceError::Storage(StorageError::NotFound))
        ));
        assert!(matches!(
            svc.delete_task(&missing).await,
            Err(TaskServiceError::Storage(StorageError::NotFound))
        ));
    }

    #[tokio::test]
    async fn newer_tasks_come_first() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut clock = fixed_clock();
        let first = TaskService::new(clock, repo.clone())
            .create_task("first")
            .await
            .unwrap();
        clock.advance(chrono::Duration::seconds(5));
        let svc = TaskService::new(clock, repo);
        let second = svc.create_task("second").await.unwrap();

        let ids: Vec<_> = svc
            .list_tasks()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id().clone())
            .collect();
        assert_eq!(ids, vec![second.id().clone(), first.id().clone()]);
    }
}
