//! Worker protocol: poll for a ready task, report its result.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use distcalc_core::wire::{TaskEnvelope, TaskResultReport};

use crate::state::AppState;

use super::{dispatch_error, parse_body};

/// Claim the next ready task.
#[utoipa::path(
    get,
    path = "/internal/task",
    tag = "Internal",
    responses(
        (status = 200, description = "Task claimed", body = TaskEnvelope),
        (status = 404, description = "No tasks available", body = String)
    )
)]
pub async fn get_task(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TaskEnvelope>, (StatusCode, String)> {
    match state.dispatcher.claim().map_err(dispatch_error)? {
        Some(task) => Ok(Json(TaskEnvelope { task })),
        None => Err((StatusCode::NOT_FOUND, "No tasks available".to_string())),
    }
}

/// Report the result of a claimed task.
#[utoipa::path(
    post,
    path = "/internal/task",
    tag = "Internal",
    request_body = TaskResultReport,
    responses(
        (status = 200, description = "Result recorded"),
        (status = 404, description = "Unknown task or expression", body = String),
        (status = 422, description = "Malformed body", body = String)
    )
)]
pub async fn post_task_result(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    let report: TaskResultReport = parse_body(&body)?;
    let outcome = state
        .dispatcher
        .complete_report(&report)
        .map_err(dispatch_error)?;
    debug!(task_id = %report.id, ?outcome, "Result recorded");
    Ok(StatusCode::OK)
}
