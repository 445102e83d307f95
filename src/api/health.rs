// src/api/health.rs
//
// Health check and readiness endpoints for load balancers and orchestrators.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::db;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    db: &'static str,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: &'static str,
    migrations: &'static str,
}

/// Returns 200 if the database answers, 503 otherwise.
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_ok = db::ping(&state.pool).await;

    let response = HealthResponse {
        status: if db_ok { "healthy" } else { "unhealthy" },
        db: if db_ok { "ok" } else { "error" },
    };

    if db_ok {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Returns 200 once the schema is in place.
///
/// GET /ready
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let migrations_ok = sqlx::query("SELECT 1 FROM users LIMIT 1")
        .fetch_optional(&state.pool)
        .await
        .is_ok();

    let response = ReadyResponse {
        status: if migrations_ok { "ready" } else { "not_ready" },
        migrations: if migrations_ok { "applied" } else { "pending" },
    };

    if migrations_ok {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// GET /live
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "alive"})))
}
