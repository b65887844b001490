/// Task endpoints
///
/// Ownership-scoped task CRUD. All handlers read the caller's identity from
/// the [`AuthContext`] injected by the auth layer; a task belonging to
/// another user is reported as 404, never 403.
///
/// # Endpoints
///
/// - `GET    /api/tasks` - List own non-deleted tasks
/// - `POST   /api/tasks` - Create a task (201)
/// - `GET    /api/tasks/:id` - Fetch one task
/// - `PUT    /api/tasks/:id` - Partial update
/// - `DELETE /api/tasks/:id` - Soft delete

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use taskcoach_shared::auth::middleware::AuthContext;
use taskcoach_shared::models::task::{Task, TaskStatus};

use crate::{
    app::AppState,
    error::ApiResult,
    routes::validate_request,
    services::tasks::{CreateTaskInput, UpdateTaskInput},
};

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title (1-100 characters after trimming)
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Optional due date (RFC 3339 or `YYYY-MM-DD`)
    pub due_date: Option<String>,

    /// Optional notes
    pub notes: Option<String>,

    /// Optional completion criteria
    pub completion_criteria: Option<String>,
}

/// Update task request
///
/// All fields optional; absent fields are left unchanged.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTaskRequest {
    /// New title
    pub title: Option<String>,

    /// New progress percentage (0-100)
    pub progress: Option<i32>,

    /// New status (`pending`, `completed`, or `deleted`)
    pub status: Option<TaskStatus>,

    /// New due date (RFC 3339 or `YYYY-MM-DD`)
    pub due_date: Option<String>,

    /// New notes
    pub notes: Option<String>,

    /// New completion criteria
    pub completion_criteria: Option<String>,
}

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// Caller's non-deleted tasks, newest first
    pub tasks: Vec<Task>,
}

/// Single task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// The task
    pub task: Task,
}

/// List the caller's tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = state.tasks.list(auth.user_id).await?;

    Ok(Json(TaskListResponse { tasks }))
}

/// Create a task for the caller
///
/// # Errors
///
/// - `400 Bad Request`: Empty/over-length title or unparseable due date
/// - `422 Unprocessable Entity`: Request-shape validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    validate_request(&req)?;

    let task = state
        .tasks
        .create(
            auth.user_id,
            CreateTaskInput {
                title: req.title,
                due_date: req.due_date,
                notes: req.notes,
                completion_criteria: req.completion_criteria,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// Fetch one of the caller's tasks
///
/// # Errors
///
/// - `404 Not Found`: Missing, deleted, or owned by another user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.get(auth.user_id, id).await?;

    Ok(Json(TaskResponse { task }))
}

/// Partially update one of the caller's tasks
///
/// # Errors
///
/// - `400 Bad Request`: Invalid title, progress, or due date
/// - `404 Not Found`: Missing, deleted, or owned by another user
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .tasks
        .update(
            auth.user_id,
            id,
            UpdateTaskInput {
                title: req.title,
                progress: req.progress,
                status: req.status,
                due_date: req.due_date,
                notes: req.notes,
                completion_criteria: req.completion_criteria,
            },
        )
        .await?;

    Ok(Json(TaskResponse { task }))
}

/// Soft-delete one of the caller's tasks
///
/// The task disappears from all subsequent reads; deleting it again
/// returns 404.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.delete(auth.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
