// src/state.rs
// Application state shared across handlers

use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use crate::auth::AuthService;
use crate::comments::CommentStore;
use crate::config::PortalConfig;
use crate::db;
use crate::news::NewsStore;
use crate::posts::PostStore;

pub struct AppState {
    pub config: PortalConfig,
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub news_store: Arc<NewsStore>,
    pub post_store: Arc<PostStore>,
    pub comment_store: Arc<CommentStore>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: PortalConfig) -> Self {
        info!("Initializing application state");

        let auth_service = Arc::new(AuthService::new(pool.clone(), &config.auth));
        let news_store = Arc::new(NewsStore::new(
            pool.clone(),
            config.content.default_news_image.clone(),
        ));
        let post_store = Arc::new(PostStore::new(pool.clone()));
        let comment_store = Arc::new(CommentStore::new(pool.clone()));

        Self {
            config,
            pool,
            auth_service,
            news_store,
            post_store,
            comment_store,
        }
    }

    /// Connects, migrates and wires every service from `config`.
    pub async fn from_config(config: PortalConfig) -> Result<Arc<Self>> {
        let pool = db::init(&config.database).await?;
        Ok(Arc::new(Self::new(pool, config)))
    }
}
