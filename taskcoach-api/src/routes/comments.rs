/// Consultation endpoints
///
/// AI coaching consultations and the read side of the consultation log.
///
/// # Endpoints
///
/// - `POST /api/tasks/:id/consult` - Run a consultation against a task (201)
/// - `GET  /api/tasks/:id/comments` - List a task's consultation log
/// - `GET  /api/ai-comments/:id` - Fetch one consultation entry
///
/// Task-scoped routes report foreign tasks as 404. Direct comment lookup
/// is the one place existence may be revealed without content: a comment
/// on someone else's task returns 403.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use taskcoach_shared::auth::middleware::AuthContext;
use taskcoach_shared::models::ai_comment::AiComment;

use crate::{app::AppState, error::ApiResult, routes::validate_request};

/// Consultation request
#[derive(Debug, Deserialize, Validate)]
pub struct ConsultRequest {
    /// Free-text consultation (1-500 characters after trimming)
    #[validate(length(min = 1, message = "Consultation text must not be empty"))]
    pub user_input: String,
}

/// Single consultation entry response
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    /// The consultation entry
    pub comment: AiComment,
}

/// Consultation log response
#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    /// Entries newest-first
    pub comments: Vec<AiComment>,
}

/// Run an AI consultation against one of the caller's tasks
///
/// On success the generated advice is appended to the task's consultation
/// log and returned. A generation failure persists nothing.
///
/// # Errors
///
/// - `400 Bad Request`: Empty or over-length consultation text
/// - `404 Not Found`: Missing, deleted, or foreign task
/// - `503 Service Unavailable`: Advice generation failed
pub async fn consult(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
    Json(req): Json<ConsultRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    validate_request(&req)?;

    let comment = state
        .coach
        .consult(auth.user_id, task_id, &req.user_input)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

/// List the consultation log of one of the caller's tasks
///
/// # Errors
///
/// - `404 Not Found`: Missing, deleted, or foreign task
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<CommentListResponse>> {
    let comments = state.coach.list_comments(auth.user_id, task_id).await?;

    Ok(Json(CommentListResponse { comments }))
}

/// Fetch a single consultation entry by id
///
/// # Errors
///
/// - `404 Not Found`: No such comment
/// - `403 Forbidden`: Comment exists but its task is not the caller's
pub async fn get_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(comment_id): Path<i64>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = state.coach.get_comment(auth.user_id, comment_id).await?;

    Ok(Json(CommentResponse { comment }))
}
