use desk_core::model::{Task, TaskId};

use super::SqliteRepository;
use super::mapping::{conn, done_to_i64, map_task_row};
use crate::repository::{StorageError, TaskRepository};

#[async_trait::async_trait]
impl TaskRepository for SqliteRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, done, created_at
            FROM tasks
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in rows {
            tasks.push(map_task_row(&row)?);
        }
        Ok(tasks)
    }

    async fn insert_task(&self, task: &Task) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO tasks (id, title, done, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(task.id().as_str())
        .bind(task.title())
        .bind(done_to_i64(task.is_done()))
        .bind(task.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => StorageError::Conflict,
            _ => StorageError::Connection(e.to_string()),
        })?;

        Ok(())
    }

    async fn set_done(&self, id: &TaskId, done: bool) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE tasks SET done = ?1 WHERE id = ?2")
            .bind(done_to_i64(done))
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
