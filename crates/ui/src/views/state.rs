use services::{PersistError, SaveExamError};

/// Outcome of the last user action, shown under the header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Notice {
    #[default]
    Idle,
    Saved(&'static str),
    Invalid(String),
    NotPersisted(String),
}

impl Notice {
    #[must_use]
    pub fn not_persisted(err: &PersistError) -> Self {
        tracing::warn!(key = %err.key, error = %err.source, "desk change not persisted");
        Notice::NotPersisted(format!(
            "Could not save {}. Changes are kept for this session only.",
            err.key
        ))
    }

    #[must_use]
    pub fn from_exam_error(err: &SaveExamError) -> Self {
        match err {
            SaveExamError::Persist(persist) => Self::not_persisted(persist),
            other => Notice::Invalid(other.to_string()),
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Notice::Idle => None,
            Notice::Saved(what) => Some(format!("{what} saved.")),
            Notice::Invalid(message) | Notice::NotPersisted(message) => Some(message.clone()),
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Notice::Idle | Notice::Saved(_) => "notice",
            Notice::Invalid(_) | Notice::NotPersisted(_) => "notice notice-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::model::ExamError;
    use storage::local::{LocalStoreError, StoreKey};

    #[test]
    fn persist_failures_name_the_slice() {
        let err = PersistError {
            key: StoreKey::Notes,
            source: LocalStoreError::Poisoned,
        };
        let notice = Notice::not_persisted(&err);
        assert!(notice.message().unwrap().contains("desk_notes_v1"));
        assert_eq!(notice.class(), "notice notice-error");
    }

    #[test]
    fn invalid_exam_date_is_reported() {
        let err = SaveExamError::Exam(ExamError::InvalidDate("soon".into()));
        let notice = Notice::from_exam_error(&err);
        assert!(matches!(notice, Notice::Invalid(ref m) if m.contains("soon")));
        assert_eq!(Notice::Idle.message(), None);
        assert_eq!(Notice::Saved("Notes").message().as_deref(), Some("Notes saved."));
    }
}
