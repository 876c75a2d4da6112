use desk_core::model::{Task, TaskId};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Storage encoding for `done`: 0 = open, 1 = done.
pub(crate) fn done_to_i64(done: bool) -> i64 {
    i64::from(done)
}

pub(crate) fn done_from_i64(value: i64) -> Result<bool, StorageError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::Serialization(format!(
            "invalid done flag: {other}"
        ))),
    }
}

pub(crate) fn map_task_row(row: &sqlx::sqlite::SqliteRow) -> Result<Task, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let title: String = row.try_get("title").map_err(ser)?;
    let done = done_from_i64(row.try_get::<i64, _>("done").map_err(ser)?)?;
    let created_at: i64 = row.try_get("created_at").map_err(ser)?;

    Task::from_persisted(TaskId::new(id), &title, done, created_at).map_err(ser)
}
