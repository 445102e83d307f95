// src/posts/handlers.rs

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;

use super::types::{CreatePostRequest, LikesResponse, Post, UpdatePostRequest};
use crate::api::error::{ApiResult, IntoApiErrorOption};
use crate::auth::AuthUser;
use crate::comments::handlers::{create_comment, list_comments};
use crate::state::AppState;

/// `/api/posts`, including the per-post comment collection
pub fn posts_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/{id}/like", put(like_post))
        .route("/{id}/unlike", put(unlike_post))
        .route("/{id}/comments", get(list_comments).post(create_comment))
}

async fn list_posts(State(app_state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Post>>> {
    let posts = app_state.post_store.list().await?;
    Ok(Json(posts))
}

async fn get_post(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Post>> {
    let post = app_state
        .post_store
        .get(&id)
        .await?
        .ok_or_not_found("Post not found")?;

    Ok(Json(post))
}

async fn create_post(
    State(app_state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let Json(req) = payload?;
    let post = app_state.post_store.create(&user, req).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    State(app_state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> ApiResult<Json<Post>> {
    let Json(req) = payload?;
    let post = app_state.post_store.update(&user, &id, req).await?;
    Ok(Json(post))
}

async fn delete_post(
    State(app_state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    app_state.post_store.delete(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn like_post(
    State(app_state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<LikesResponse>> {
    let likes = app_state.post_store.like(&user, &id).await?;
    Ok(Json(LikesResponse { likes }))
}

async fn unlike_post(
    State(app_state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<LikesResponse>> {
    let likes = app_state.post_store.unlike(&user, &id).await?;
    Ok(Json(LikesResponse { likes }))
}
