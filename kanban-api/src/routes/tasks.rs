/// Task endpoints
///
/// All routes sit behind the session middleware. Status strings are parsed
/// into [`TaskStatus`] here, so anything other than `todo`, `in-progress` or
/// `done` is rejected with 422 before reaching the store.
///
/// # Endpoints
///
/// - `GET /api/tasks/:board_id` - List a board's tasks
/// - `POST /api/tasks` - Create a task
/// - `PUT /api/tasks/:id` - Replace a task's title, description and status
/// - `PUT /api/tasks/:id/status` - Move a task to another column
/// - `DELETE /api/tasks/:id` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
    routes::{auth::MessageResponse, boards::load_board},
    session::SessionUser,
};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use kanban_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Board to add the task to
    pub board_id: Uuid,

    /// Card title
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,

    /// Optional details
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    /// Initial column, `todo` when omitted
    pub status: Option<String>,
}

/// Full task update request
///
/// Unknown fields such as `_id` or `boardId` are ignored, so a client can
/// send back the task object it received.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    pub status: String,
}

/// Status-only update request, sent when a card is dropped on a column
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

fn parse_status(value: &str) -> ApiResult<TaskStatus> {
    value
        .parse::<TaskStatus>()
        .map_err(|e| ApiError::invalid_field("status", e.to_string()))
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_string())
}

/// Loads a task the caller may modify
async fn load_task(state: &AppState, session: &SessionUser, task_id: Uuid) -> ApiResult<Task> {
    let task = state
        .store
        .get_task(task_id)
        .await?
        .ok_or_else(task_not_found)?;

    if state.config.api.enforce_board_ownership {
        // Hide tasks on boards the caller does not own
        load_board(state, session, task.board_id)
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => task_not_found(),
                other => other,
            })?;
    }

    Ok(task)
}

/// List a board's tasks
///
/// ```text
/// GET /api/tasks/:board_id
/// ```
///
/// ```json
/// [{ "_id": "uuid", "boardId": "uuid", "title": "...", "description": "", "status": "todo", ... }]
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    ApiPath(board_id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<Task>>> {
    if state.config.api.enforce_board_ownership {
        load_board(&state, &session, board_id).await?;
    }

    let tasks = state.store.list_tasks_by_board(board_id).await?;
    Ok(Json(tasks))
}

/// Create a task
///
/// ```text
/// POST /api/tasks
/// Content-Type: application/json
///
/// { "boardId": "uuid", "title": "Write docs", "description": "", "status": "todo" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Board does not exist (or is not the caller's)
/// - `422 Unprocessable Entity`: Bad title, description or status
pub async fn create_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;
    let status = match req.status.as_deref() {
        Some(value) => parse_status(value)?,
        None => TaskStatus::default(),
    };

    load_board(&state, &session, req.board_id).await?;

    let task = state
        .store
        .create_task(CreateTask {
            board_id: req.board_id,
            title: req.title,
            description: req.description,
            status,
        })
        .await?;

    tracing::info!(task_id = %task.id, board_id = %task.board_id, status = %task.status, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Replace a task's editable fields
///
/// ```text
/// PUT /api/tasks/:id
/// Content-Type: application/json
///
/// { "title": "Write docs", "description": "API section", "status": "in-progress" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `422 Unprocessable Entity`: Bad title, description or status
pub async fn update_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    ApiPath(task_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;
    let status = parse_status(&req.status)?;

    load_task(&state, &session, task_id).await?;

    let task = state
        .store
        .update_task(
            task_id,
            UpdateTask {
                title: req.title,
                description: req.description,
                status,
            },
        )
        .await?
        .ok_or_else(task_not_found)?;

    tracing::info!(task_id = %task.id, "Task updated");

    Ok(Json(task))
}

/// Move a task to another column
///
/// ```text
/// PUT /api/tasks/:id/status
/// Content-Type: application/json
///
/// { "status": "done" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `422 Unprocessable Entity`: Unknown status
pub async fn update_task_status(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    ApiPath(task_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> ApiResult<Json<Task>> {
    let status = parse_status(&req.status)?;

    let current = load_task(&state, &session, task_id).await?;

    let task = state
        .store
        .update_task_status(task_id, status)
        .await?
        .ok_or_else(task_not_found)?;

    tracing::info!(
        task_id = %task.id,
        from = %current.status,
        to = %task.status,
        "Task moved"
    );

    Ok(Json(task))
}

/// Delete a task
///
/// ```text
/// DELETE /api/tasks/:id
/// ```
///
/// ```json
/// { "message": "Task deleted" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such task, including a second delete of the same id
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    ApiPath(task_id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    load_task(&state, &session, task_id).await?;

    if !state.store.delete_task(task_id).await? {
        return Err(task_not_found());
    }

    tracing::info!(task_id = %task_id, "Task deleted");

    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_accepts_columns() {
        assert_eq!(parse_status("todo").unwrap(), TaskStatus::Todo);
        assert_eq!(parse_status("in-progress").unwrap(), TaskStatus::InProgress);
        assert_eq!(parse_status("done").unwrap(), TaskStatus::Done);
    }

    #[test]
    fn test_parse_status_rejects_other_values() {
        let err = parse_status("archived").unwrap_err();
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "status");
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateTaskRequest = serde_json::from_value(serde_json::json!({
            "boardId": Uuid::new_v4(),
            "title": "Write docs"
        }))
        .unwrap();

        assert_eq!(req.description, "");
        assert!(req.status.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_ignores_extra_fields() {
        let req: UpdateTaskRequest = serde_json::from_value(serde_json::json!({
            "_id": Uuid::new_v4(),
            "boardId": Uuid::new_v4(),
            "title": "Edited",
            "description": "more",
            "status": "done"
        }))
        .unwrap();

        assert_eq!(req.title, "Edited");
        assert_eq!(req.status, "done");
    }

    #[test]
    fn test_empty_title_rejected() {
        let req = UpdateTaskRequest {
            title: String::new(),
            description: String::new(),
            status: "todo".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
