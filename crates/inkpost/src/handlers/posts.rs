use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use inkpost_core::blog::{
    CreatePostRequest, GetPostRequest, LikePostRequest, UpdateImageRequest,
};

use crate::{handlers::ApiError, state::AppState};

/// Create a new post (POST /api/posts).
///
/// The body is taken as untyped JSON so validation can name every
/// offending field in one response.
pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request = CreatePostRequest::from_value(&body)?;
    let post = state.posts.create(request).await?;
    Ok((StatusCode::OK, Json(post)))
}

/// List all posts, newest first (GET /api/posts).
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state.posts.list_reversed().await?;
    Ok(Json(posts))
}

/// Get a single post by ID (GET /api/posts/{id}).
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let request = GetPostRequest::from_path(&id)?;
    let post = state.posts.read(request).await?;
    Ok(Json(post))
}

/// Like a post by ID (POST /api/posts/{id}/like).
pub async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let request = LikePostRequest::from_path(&id)?;
    let post = state.posts.like(request).await?;
    Ok(Json(post))
}

/// Attach or replace a post image (PUT /api/posts/{id}/image).
pub async fn update_post_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request = UpdateImageRequest::from_parts(&id, &body)?;
    let post = state.posts.update_logo(request).await?;
    Ok(Json(post))
}
