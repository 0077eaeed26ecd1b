//! Task endpoints — preparer-assigned to-dos per client.

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{get_client, get_tasks_for_client, insert_task, update_task_status};
use crate::db::timestamp_now;
use crate::models::enums::{TaskPriority, TaskStatus};
use crate::models::Task;

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub client_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

/// `POST /api/tasks`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".into()));
    }

    let conn = ctx.open_db()?;
    get_client(&conn, &payload.client_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Client {}", payload.client_id)))?;

    let task = Task {
        id: Uuid::new_v4(),
        client_id: payload.client_id,
        title: payload.title.trim().to_string(),
        description: payload.description,
        priority: payload.priority.unwrap_or(TaskPriority::Medium),
        status: TaskStatus::Pending,
        due_date: payload.due_date,
        created_at: timestamp_now(),
        completed_at: None,
    };
    insert_task(&conn, &task).map_err(ApiError::from)?;

    Ok(Json(task))
}

/// `GET /api/clients/:id/tasks` — newest first.
pub async fn list_for_client(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let client_id = parse_id(&id)?;
    let conn = ctx.open_db()?;

    get_client(&conn, &client_id)
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Client {client_id}")))?;

    let tasks = get_tasks_for_client(&conn, &client_id).map_err(ApiError::from)?;
    Ok(Json(tasks))
}

#[derive(Deserialize)]
pub struct TaskStatusRequest {
    pub status: TaskStatus,
}

/// `PUT /api/tasks/:id/status`
pub async fn status(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(payload): Json<TaskStatusRequest>,
) -> Result<Json<Task>, ApiError> {
    let task_id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    let task = update_task_status(&conn, &task_id, &payload.status, &timestamp_now())
        .map_err(ApiError::from)?;
    Ok(Json(task))
}
