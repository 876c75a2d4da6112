use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TaskId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaskError {
    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("task id cannot be empty")]
    EmptyId,
}

//
// ─── TASK ──────────────────────────────────────────────────────────────────────
//

/// A single study task.
///
/// The title is always trimmed and non-empty. `created_at` is milliseconds
/// since the Unix epoch and drives newest-first ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    id: TaskId,
    title: String,
    done: bool,
    created_at: i64,
}

impl Task {
    /// Creates a new, not-yet-done task.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::EmptyTitle` if the title is empty after trimming.
    pub fn new(id: TaskId, title: &str, created_at: i64) -> Result<Self, TaskError> {
        Self::from_persisted(id, title, false, created_at)
    }

    /// Rebuilds a task from stored fields, re-checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns `TaskError` if the id or title is blank.
    pub fn from_persisted(
        id: TaskId,
        title: &str,
        done: bool,
        created_at: i64,
    ) -> Result<Self, TaskError> {
        if id.as_str().trim().is_empty() {
            return Err(TaskError::EmptyId);
        }
        let title = normalize_title(title).ok_or(TaskError::EmptyTitle)?;
        Ok(Self {
            id,
            title,
            done,
            created_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[must_use]
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }
}

/// Trims a candidate title, returning `None` when nothing is left.
#[must_use]
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Sorts tasks newest-created first. Ties keep their current relative order.
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// Client-side data written before `created_at` existed has no timestamp.
#[derive(Deserialize)]
struct RawTask {
    id: TaskId,
    title: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    created_at: i64,
}

impl TryFrom<RawTask> for Task {
    type Error = TaskError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        Task::from_persisted(raw.id, &raw.title, raw.done, raw.created_at)
    }
}
