//! Shared error types for the services crate.

use thiserror::Error;

use desk_core::model::{ExamError, TaskError};
use storage::local::{LocalStoreError, StoreKey};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `TaskService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaskServiceError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateServiceError {
    #[error(transparent)]
    Exam(#[from] ExamError),
    #[error("failed to encode {key} value: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A `StudyDesk` mutation that was applied in memory but could not be written
/// to the local store.
#[derive(Debug, Error)]
#[error("failed to persist {key}: {source}")]
pub struct PersistError {
    pub key: StoreKey,
    #[source]
    pub source: LocalStoreError,
}

/// Errors emitted by `StudyDesk::save_exam`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SaveExamError {
    #[error(transparent)]
    Exam(#[from] ExamError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Errors emitted by `ApiClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiClientError {
    #[error("backend rejected request with status {status}: {code}")]
    Rejected {
        status: reqwest::StatusCode,
        code: String,
    },
    #[error("invalid backend url {raw}: {reason}")]
    InvalidBaseUrl { raw: String, reason: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiClientError {
    /// Machine-readable reason code returned by the backend, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiClientError::Rejected { code, .. } => Some(code),
            ApiClientError::InvalidBaseUrl { .. } | ApiClientError::Http(_) => None,
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
