// src/api/router.rs
// HTTP router composition for the REST API, health probes and the SPA bundle

use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::error::ApiError;
use super::health::{health_check, liveness_check, readiness_check};
use crate::admin::admin_router;
use crate::auth::handlers::{auth_router, users_router};
use crate::comments::comments_router;
use crate::config::HttpConfig;
use crate::home::home_handler;
use crate::news::news_router;
use crate::posts::posts_router;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 256 * 1024;

/// Routes under `/api`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home", get(home_handler))
        .nest("/users", users_router())
        .nest("/auth", auth_router().merge(admin_router()))
        .nest("/actualites", news_router())
        .nest("/posts", posts_router())
        .nest("/comments", comments_router())
        .fallback(api_not_found)
}

/// Create the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let http = &state.config.http;

    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(Duration::from_secs(http.request_timeout_seconds));

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
        .nest("/api", api_router());

    if let Some(dir) = http.static_dir.as_deref() {
        router = router.fallback_service(spa_service(dir));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(http))
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}

/// Static files from `dir`; unknown paths get `index.html` so the
/// client-side router can resolve them.
fn spa_service(dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(dir).join("index.html");
    if !index.exists() {
        warn!("STATIC_DIR {} has no index.html", dir);
    }
    info!("Serving front end from {}", dir);
    ServeDir::new(dir).fallback(ServeFile::new(index))
}

fn cors_layer(http: &HttpConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    let origins = http.allowed_origins();
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(values))
}

// nested routers see the path without `/api`
async fn api_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
