// src/comments/handlers.rs

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::delete,
    Json, Router,
};
use std::sync::Arc;

use super::types::{Comment, CreateCommentRequest};
use crate::api::error::ApiResult;
use crate::auth::AuthUser;
use crate::state::AppState;

/// `DELETE /api/comments/{id}`; listing and creation hang off `/api/posts/{id}/comments`
pub fn comments_router() -> Router<Arc<AppState>> {
    Router::new().route("/{id}", delete(delete_comment))
}

pub async fn list_comments(
    State(app_state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Vec<Comment>>> {
    let comments = app_state.comment_store.list_for_post(&post_id).await?;
    Ok(Json(comments))
}

pub async fn create_comment(
    State(app_state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<String>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let Json(req) = payload?;
    let comment = app_state.comment_store.create(&user, &post_id, req).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn delete_comment(
    State(app_state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    app_state.comment_store.delete(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
