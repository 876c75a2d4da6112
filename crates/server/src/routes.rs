use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use desk_core::model::{ExamDraft, Task, TaskId};
use services::DeskState;

use crate::ApiState;
use crate::error::ApiError;

const BANNER: &str = "Exam Desk API is running. Try /health, /api/tasks, /api/state";

pub(crate) fn routes() -> Router<ApiState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:id", patch(set_done).delete(delete_task))
        .route("/api/state", get(load_state))
        .route("/api/notes", put(save_notes))
        .route("/api/exam", put(save_exam))
        .fallback(unknown_route)
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound
}

async fn banner() -> &'static str {
    BANNER
}

async fn health() -> Json<Value> {
    ok()
}

fn ok() -> Json<Value> {
    Json(json!({ "ok": true }))
}

fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected request body");
            Err(ApiError::InvalidJson)
        }
    }
}

// Absent or null reads as empty; `None` means the field has the wrong type.
fn optional_str(value: &Value, field: &str) -> Option<String> {
    match value.get(field) {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => None,
    }
}

async fn list_tasks(State(state): State<ApiState>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.services.tasks().list_tasks().await?))
}

async fn create_task(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let value = body(payload)?;
    let title = value
        .get("title")
        .and_then(Value::as_str)
        .ok_or(ApiError::TitleRequired)?;
    let task = state.services.tasks().create_task(title).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn set_done(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let value = body(payload)?;
    let done = value
        .get("done")
        .and_then(Value::as_bool)
        .ok_or(ApiError::DoneBooleanRequired)?;
    state
        .services
        .tasks()
        .set_done(&TaskId::new(id), done)
        .await?;
    Ok(ok())
}

async fn delete_task(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .services
        .tasks()
        .delete_task(&TaskId::new(id))
        .await?;
    Ok(ok())
}

async fn load_state(State(state): State<ApiState>) -> Result<Json<DeskState>, ApiError> {
    Ok(Json(state.services.state().load_state().await?))
}

async fn save_notes(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let value = body(payload)?;
    let notes = optional_str(&value, "notes").ok_or(ApiError::NotesStringRequired)?;
    state.services.state().save_notes(&notes).await?;
    Ok(ok())
}

async fn save_exam(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let value = body(payload)?;
    let label = optional_str(&value, "label").ok_or(ApiError::ExamInvalid)?;
    let date = optional_str(&value, "date").ok_or(ApiError::ExamInvalid)?;
    state
        .services
        .state()
        .save_exam(ExamDraft::new(label, date))
        .await?;
    Ok(ok())
}
