use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use inkpost_core::blog::{CreateCommentRequest, DeleteCommentRequest, GetCommentRequest};

use crate::{handlers::ApiError, state::AppState};

/// Create a new comment (POST /api/comments).
pub async fn create_comment(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request = CreateCommentRequest::from_value(&body)?;
    let comment = state.comments.create(request).await?;
    Ok((StatusCode::OK, Json(comment)))
}

/// List all comments, newest first (GET /api/comments).
pub async fn list_comments(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let comments = state.comments.list_reversed().await?;
    Ok(Json(comments))
}

/// Get a single comment by ID (GET /api/comments/{id}).
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let request = GetCommentRequest::from_path(&id)?;
    let comment = state.comments.read(request).await?;
    Ok(Json(comment))
}

/// Delete a comment by ID (DELETE /api/comments/{id}).
///
/// Dispatches a `comment.deleted` event before answering 204.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let request = DeleteCommentRequest::from_path(&id)?;
    state.comments.delete(request).await?;
    Ok(StatusCode::NO_CONTENT)
}
