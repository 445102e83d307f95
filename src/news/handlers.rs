// src/news/handlers.rs

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

use super::types::{Actualite, CreateActualiteRequest, ListQuery, UpdateActualiteRequest};
use crate::api::error::{ApiError, ApiResult, IntoApiErrorOption};
use crate::auth::AdminUser;
use crate::state::AppState;

/// `/api/actualites`: public reads, admin-only writes
pub fn news_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_actualites).post(create_actualite))
        .route(
            "/{id}",
            get(get_actualite).put(update_actualite).delete(delete_actualite),
        )
}

async fn list_actualites(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Actualite>>> {
    let Query(query) = query?;
    let items = app_state.news_store.list(query.limit).await?;
    Ok(Json(items))
}

async fn get_actualite(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Actualite>> {
    let item = app_state
        .news_store
        .get(&id)
        .await?
        .ok_or_not_found("Actualité not found")?;

    Ok(Json(item))
}

async fn create_actualite(
    State(app_state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<CreateActualiteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Actualite>)> {
    let Json(req) = payload?;
    let item = app_state.news_store.create(&admin.id, req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_actualite(
    State(app_state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateActualiteRequest>, JsonRejection>,
) -> ApiResult<Json<Actualite>> {
    let Json(req) = payload?;
    let item = app_state
        .news_store
        .update(&id, req)
        .await?
        .ok_or_not_found("Actualité not found")?;

    info!("Actualité {} updated by {}", id, admin.id);
    Ok(Json(item))
}

async fn delete_actualite(
    State(app_state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !app_state.news_store.delete(&id).await? {
        return Err(ApiError::not_found("Actualité not found"));
    }

    info!("Actualité {} removed by {}", id, admin.id);
    Ok(StatusCode::NO_CONTENT)
}
