//! Task comment endpoints.
//!
//! Comments are append-only; there is no edit or delete route. Both
//! endpoints require membership of the task's project.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    session::Session,
};
use axum::{
    extract::{Path, State},
    Json,
};
use sprintboard_shared::models::{
    comment::{Comment, CreateComment},
    task::Task,
};
use serde::Deserialize;
use uuid::Uuid;

/// Add-comment request body
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    /// Comment text
    pub body: String,
}

/// Post a comment on a task
///
/// `POST /v1/tasks/:id/comments` with `{"body": "..."}`.
pub async fn add_comment(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<Json<Comment>> {
    let body = req.body.trim();
    if body.is_empty() {
        return Err(ApiError::BadRequest("Comment body must not be empty".to_string()));
    }

    let task = Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    session.require_member(&state.db, task.project_id).await?;

    let comment = Comment::create(
        &state.db,
        CreateComment {
            task_id: task.id,
            author_id: session.user_id,
            body: body.to_string(),
        },
    )
    .await?;

    Ok(Json(comment))
}

/// List a task's comments, oldest first
///
/// `GET /v1/tasks/:id/comments`.
pub async fn list_comments(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Comment>>> {
    let task = Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    session.require_member(&state.db, task.project_id).await?;

    let comments = Comment::list_by_task(&state.db, task.id).await?;

    Ok(Json(comments))
}
