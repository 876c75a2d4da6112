use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use desk_core::model::TaskError;
use services::{StateServiceError, TaskServiceError};
use storage::repository::StorageError;

/// Request failures, each mapped to a status and a stable reason code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("title_required")]
    TitleRequired,
    #[error("done_boolean_required")]
    DoneBooleanRequired,
    #[error("notes_string_required")]
    NotesStringRequired,
    #[error("exam_invalid")]
    ExamInvalid,
    #[error("date_invalid")]
    DateInvalid,
    #[error("invalid_json")]
    InvalidJson,
    #[error("not_found")]
    NotFound,
    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ApiError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::TitleRequired => "title_required",
            ApiError::DoneBooleanRequired => "done_boolean_required",
            ApiError::NotesStringRequired => "notes_string_required",
            ApiError::ExamInvalid => "exam_invalid",
            ApiError::DateInvalid => "date_invalid",
            ApiError::InvalidJson => "invalid_json",
            ApiError::NotFound => "not_found",
            ApiError::Internal(_) => "internal",
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }
        (self.status(), Json(ErrorBody { error: self.code() })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Task(TaskError::EmptyTitle) => ApiError::TitleRequired,
            TaskServiceError::Task(TaskError::EmptyId) => ApiError::NotFound,
            TaskServiceError::Storage(storage) => storage.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<StateServiceError> for ApiError {
    fn from(err: StateServiceError) -> Self {
        match err {
            StateServiceError::Exam(_) => ApiError::DateInvalid,
            StateServiceError::Storage(storage) => storage.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
