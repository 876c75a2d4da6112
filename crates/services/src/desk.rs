//! Client-side study desk state.
//!
//! `StudyDesk` owns every slice the page shows and writes each slice to a
//! [`LocalStore`] as soon as it changes. Writes are synchronous; a failed
//! write leaves the in-memory change in place and reports a [`PersistError`]
//! so the caller can tell the user the change will not survive a restart.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;

use desk_core::kpi::{Kpis, compute_kpis};
use desk_core::model::{
    ExamDraft, ExamInfo, SubjectProgress, Task, TaskId, UspCard, default_subjects,
    default_usp_cards, normalize_title,
};
use storage::local::{LocalStore, StoreKey, load_or_default, store_value};

use crate::Clock;
use crate::error::{PersistError, SaveExamError};

#[derive(Clone)]
pub struct StudyDesk {
    store: Arc<dyn LocalStore>,
    clock: Clock,
    tasks: Vec<Task>,
    notes: String,
    exam: ExamInfo,
    focus: bool,
    subjects: Vec<SubjectProgress>,
    usp_cards: Vec<UspCard>,
}

impl StudyDesk {
    /// Load every slice from `store`, using defaults for anything absent or corrupt.
    #[must_use]
    pub fn load(store: Arc<dyn LocalStore>, clock: Clock) -> Self {
        let mut desk = Self {
            store,
            clock,
            tasks: Vec::new(),
            notes: String::new(),
            exam: ExamInfo::default(),
            focus: false,
            subjects: Vec::new(),
            usp_cards: Vec::new(),
        };
        desk.reload();
        desk
    }

    fn reload(&mut self) {
        let store = self.store.as_ref();
        self.tasks = load_or_default(store, StoreKey::Tasks, Vec::new()).into_inner();
        self.notes = load_or_default(store, StoreKey::Notes, String::new()).into_inner();
        self.exam = load_or_default(store, StoreKey::Exam, ExamInfo::default()).into_inner();
        self.focus = load_or_default(store, StoreKey::Focus, false).into_inner();
        self.subjects = load_or_default(store, StoreKey::Subjects, default_subjects()).into_inner();
        self.usp_cards = load_or_default(store, StoreKey::Usp, default_usp_cards()).into_inner();
        tracing::debug!(tasks = self.tasks.len(), focus = self.focus, "desk loaded");
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn exam(&self) -> &ExamInfo {
        &self.exam
    }

    #[must_use]
    pub fn focus(&self) -> bool {
        self.focus
    }

    #[must_use]
    pub fn subjects(&self) -> &[SubjectProgress] {
        &self.subjects
    }

    #[must_use]
    pub fn usp_cards(&self) -> &[UspCard] {
        &self.usp_cards
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// KPIs as of the desk clock's current local time.
    #[must_use]
    pub fn kpis(&self) -> Kpis {
        self.kpis_at(self.clock.now_local())
    }

    #[must_use]
    pub fn kpis_at(&self, now: NaiveDateTime) -> Kpis {
        compute_kpis(&self.tasks, &self.notes, &self.exam, now)
    }

    /// Add a task at the front of the list.
    ///
    /// Returns `Ok(None)` without touching state when the title is blank.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the task list could not be written; the task
    /// is still added in memory.
    pub fn add_task(&mut self, title: &str) -> Result<Option<Task>, PersistError> {
        let Some(title) = normalize_title(title) else {
            return Ok(None);
        };
        let Ok(task) = Task::new(TaskId::generate(), &title, self.clock.now_millis()) else {
            return Ok(None);
        };
        self.tasks.insert(0, task.clone());
        tracing::debug!(id = %task.id(), "task added");
        self.persist(StoreKey::Tasks, &self.tasks)?;
        Ok(Some(task))
    }

    /// Set the completion flag of the task with `id`.
    ///
    /// Returns `Ok(false)` when no task has that id.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the task list could not be written.
    pub fn toggle_task(&mut self, id: &TaskId, done: bool) -> Result<bool, PersistError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) else {
            return Ok(false);
        };
        task.set_done(done);
        self.persist(StoreKey::Tasks, &self.tasks)?;
        Ok(true)
    }

    /// Remove the task with `id`. Returns `Ok(false)` when no task has that id.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the task list could not be written.
    pub fn delete_task(&mut self, id: &TaskId) -> Result<bool, PersistError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.persist(StoreKey::Tasks, &self.tasks)?;
        Ok(true)
    }

    /// Replace the notes wholesale. Empty text is allowed.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the notes could not be written.
    pub fn save_notes(&mut self, text: &str) -> Result<(), PersistError> {
        text.clone_into(&mut self.notes);
        self.persist(StoreKey::Notes, &self.notes)
    }

    /// Validate and replace the exam wholesale.
    ///
    /// # Errors
    ///
    /// Returns `SaveExamError::Exam` for an unparsable date, leaving the
    /// current exam untouched.
    /// Returns `SaveExamError::Persist` if the exam could not be written.
    pub fn save_exam(&mut self, label: &str, date: &str) -> Result<&ExamInfo, SaveExamError> {
        self.exam = ExamDraft::new(label, date).validate()?;
        self.persist(StoreKey::Exam, &self.exam)?;
        Ok(&self.exam)
    }

    /// # Errors
    ///
    /// Returns `PersistError` if the flag could not be written.
    pub fn set_focus(&mut self, on: bool) -> Result<(), PersistError> {
        self.focus = on;
        self.persist(StoreKey::Focus, &self.focus)
    }

    /// Remove every desk key from the store and reload the defaults.
    ///
    /// # Errors
    ///
    /// Returns the first `PersistError`; later keys are still attempted.
    pub fn reset(&mut self) -> Result<(), PersistError> {
        let mut first_error = None;
        for key in StoreKey::ALL {
            if let Err(source) = self.store.remove(key.as_str()) {
                tracing::warn!(%key, error = %source, "failed to clear key");
                first_error.get_or_insert(PersistError { key, source });
            }
        }
        self.reload();
        tracing::info!("desk reset");
        first_error.map_or(Ok(()), Err)
    }

    fn persist<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), PersistError> {
        store_value(self.store.as_ref(), key, value).map_err(|source| {
            tracing::warn!(%key, error = %source, "not persisted for this session");
            PersistError { key, source }
        })
    }
}
