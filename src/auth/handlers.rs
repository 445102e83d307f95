// src/auth/handlers.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

use super::guard::AuthUser;
use super::models::{AuthResponse, LoginRequest, RegisterRequest, UpdateSettingsRequest, User};
use crate::api::error::ApiResult;
use crate::state::AppState;

/// `POST /api/users`
pub fn users_router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(register))
}

/// `/api/auth` session endpoints; the admin endpoints are merged in by the admin module
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(load_user).post(login))
        .route("/settings", put(update_settings))
}

async fn register(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let Json(req) = payload?;
    let response = app_state.auth_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    let response = app_state.auth_service.login(req).await?;
    Ok(Json(response))
}

async fn load_user(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

async fn update_settings(
    State(app_state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(req) = payload?;
    let updated = app_state.auth_service.update_settings(&user.id, req).await?;
    info!("User {} updated their settings", user.id);
    Ok(Json(updated))
}
