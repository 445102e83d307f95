// src/admin/handlers.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use super::stats::{dashboard_stats, DashboardStats};
use crate::api::error::{missing_param_error, ApiResult};
use crate::auth::{AdminUser, Role, RoleChangeRequest, User};
use crate::state::AppState;

/// Admin-only endpoints, nested under `/api/auth` next to the session routes
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/stats", get(stats))
        .route("/make-admin", post(make_admin))
        .route("/remove-admin", post(remove_admin))
}

async fn list_users(
    State(app_state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<Vec<User>>> {
    let users = app_state.auth_service.list_users().await?;
    Ok(Json(users))
}

async fn stats(
    State(app_state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<DashboardStats>> {
    let users = app_state.auth_service.list_users().await?;
    Ok(Json(dashboard_stats(&users)))
}

async fn make_admin(
    State(app_state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<RoleChangeRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    change_role(&app_state, &admin, payload, Role::Admin).await
}

async fn remove_admin(
    State(app_state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<RoleChangeRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    change_role(&app_state, &admin, payload, Role::User).await
}

async fn change_role(
    app_state: &AppState,
    admin: &User,
    payload: Result<Json<RoleChangeRequest>, JsonRejection>,
    role: Role,
) -> ApiResult<Json<User>> {
    let Json(req) = payload?;
    let target = req.user_id.trim();
    if target.is_empty() {
        return Err(missing_param_error("userId"));
    }

    let updated = app_state.auth_service.set_role(admin, target, role).await?;
    Ok(Json(updated))
}
