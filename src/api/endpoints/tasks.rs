//! Cross-meeting task queries.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::MeetingTask;

#[derive(Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<MeetingTask>,
}

/// `GET /api/tasks/high-priority`: high priority action items across
/// all meetings.
pub async fn high_priority(
    State(ctx): State<ApiContext>,
) -> Result<Json<TasksResponse>, ApiError> {
    let tasks = ctx.store.high_priority_tasks().map_err(ApiError::from)?;
    Ok(Json(TasksResponse { tasks }))
}
