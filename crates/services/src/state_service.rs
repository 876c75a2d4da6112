use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use desk_core::model::{ExamDraft, ExamInfo};
use storage::repository::{KvKey, KvRepository};

use crate::error::StateServiceError;

/// Notes and exam as served by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskState {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exam: ExamInfo,
}

/// Backend key-value state (notes, exam) over a `KvRepository`.
///
/// Values are stored JSON-encoded. A stored value that no longer decodes is
/// treated as absent.
#[derive(Clone)]
pub struct StateService {
    kv: Arc<dyn KvRepository>,
}

impl StateService {
    #[must_use]
    pub fn new(kv: Arc<dyn KvRepository>) -> Self {
        Self { kv }
    }

    /// Current notes and exam, with defaults for anything never saved.
    ///
    /// # Errors
    ///
    /// Returns `StateServiceError::Storage` if repository access fails.
    pub async fn load_state(&self) -> Result<DeskState, StateServiceError> {
        let notes = self.load_or_default(KvKey::Notes, String::new()).await?;
        let exam = self.load_or_default(KvKey::Exam, ExamInfo::default()).await?;
        Ok(DeskState { notes, exam })
    }

    /// Replace the notes wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StateServiceError::Storage` if the upsert fails.
    pub async fn save_notes(&self, notes: &str) -> Result<(), StateServiceError> {
        self.put(KvKey::Notes, notes).await?;
        tracing::debug!(len = notes.len(), "notes saved");
        Ok(())
    }

    /// Validate and replace the exam wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StateServiceError::Exam` if the date is not `YYYY-MM-DD`.
    /// Returns `StateServiceError::Storage` if the upsert fails.
    pub async fn save_exam(&self, draft: ExamDraft) -> Result<ExamInfo, StateServiceError> {
        let exam = draft.validate()?;
        self.put(KvKey::Exam, &exam).await?;
        tracing::debug!(label = exam.label(), date = %exam.date_string(), "exam saved");
        Ok(exam)
    }

    async fn put<T: Serialize + ?Sized>(
        &self,
        key: KvKey,
        value: &T,
    ) -> Result<(), StateServiceError> {
        let raw = serde_json::to_string(value).map_err(|source| StateServiceError::Encode {
            key: key.as_str(),
            source,
        })?;
        self.kv.put_value(key, &raw).await?;
        Ok(())
    }

    async fn load_or_default<T: DeserializeOwned>(
        &self,
        key: KvKey,
        fallback: T,
    ) -> Result<T, StateServiceError> {
        let Some(raw) = self.kv.get_value(key).await? else {
            return Ok(fallback);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(%key, error = %err, "stored value is corrupt; using default");
                Ok(fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use desk_core::model::ExamError;
    use storage::repository::InMemoryRepository;

    fn service() -> (StateService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        (StateService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn empty_store_yields_defaults() {
        let (svc, _) = service();
        let state = svc.load_state().await.unwrap();
        assert_eq!(state, DeskState::default());
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            serde_json::json!({"notes": "", "exam": {"label": "", "date": ""}})
        );
    }

    #[tokio::test]
    async fn saves_replace_previous_values() {
        let (svc, repo) = service();
        svc.save_notes("first").await.unwrap();
        svc.save_notes("second").await.unwrap();
        svc.save_exam(ExamDraft::new(" Chemistry ", "2026-06-01"))
            .await
            .unwrap();

        let state = svc.load_state().await.unwrap();
        assert_eq!(state.notes, "second");
        assert_eq!(state.exam.label(), "Chemistry");
        assert_eq!(state.exam.date(), NaiveDate::from_ymd_opt(2026, 6, 1));
        assert_eq!(
            repo.get_value(KvKey::Notes).await.unwrap().as_deref(),
            Some("\"second\"")
        );
    }

    #[tokio::test]
    async fn invalid_exam_date_leaves_state_untouched() {
        let (svc, _) = service();
        svc.save_exam(ExamDraft::new("Bio", "2026-05-05"))
            .await
            .unwrap();
        let err = svc
            .save_exam(ExamDraft::new("Bio", "05/05/2026"))
            .await
            .unwrap_err();
        assert!(matches!(err, StateServiceError::Exam(ExamError::InvalidDate(_))));
        assert_eq!(
            svc.load_state().await.unwrap().exam.date_string(),
            "2026-05-05"
        );
    }

    #[tokio::test]
    async fn corrupt_value_falls_back_to_default() {
        let (svc, repo) = service();
        repo.put_value(KvKey::Exam, "{broken").await.unwrap();
        repo.put_value(KvKey::Notes, "\"kept\"").await.unwrap();
        let state = svc.load_state().await.unwrap();
        assert_eq!(state.exam, ExamInfo::default());
        assert_eq!(state.notes, "kept");
    }
}
