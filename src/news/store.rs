// src/news/store.rs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::types::{Actualite, CreateActualiteRequest, UpdateActualiteRequest};
use crate::error::{PortalError, PortalResult};
use crate::validation;

pub const MAX_LIST_LIMIT: i64 = 100;

const SELECT_ACTUALITE: &str = r#"
    SELECT a.id, a.title, a.content, a.date, a.image_url, a.author, u.name AS author_name
    FROM actualites a
    LEFT JOIN users u ON u.id = a.author
"#;

pub struct NewsStore {
    pool: SqlitePool,
    default_image: String,
}

impl NewsStore {
    pub fn new(pool: SqlitePool, default_image: impl Into<String>) -> Self {
        Self {
            pool,
            default_image: default_image.into(),
        }
    }

    /// Newest first; `limit` is clamped to `1..=MAX_LIST_LIMIT`.
    pub async fn list(&self, limit: Option<i64>) -> PortalResult<Vec<Actualite>> {
        let limit = limit.unwrap_or(MAX_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);

        let items = sqlx::query_as::<_, Actualite>(&format!(
            "{SELECT_ACTUALITE} ORDER BY a.date DESC, a.id DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn get(&self, id: &str) -> PortalResult<Option<Actualite>> {
        let item = sqlx::query_as::<_, Actualite>(&format!("{SELECT_ACTUALITE} WHERE a.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    pub async fn create(
        &self,
        author_id: &str,
        req: CreateActualiteRequest,
    ) -> PortalResult<Actualite> {
        let id = Uuid::new_v4().to_string();
        let title = validation::required(&req.title, "Title is required")?;
        let content = validation::required(&req.content, "Content is required")?;
        let image_url =
            validation::optional(req.image_url).unwrap_or_else(|| self.default_image.clone());
        let date = req.date.unwrap_or_else(Utc::now);

        sqlx::query(
            r#"
            INSERT INTO actualites (id, title, content, date, image_url, author)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&title)
        .bind(&content)
        .bind(date)
        .bind(&image_url)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        info!("Published actualité {} by {}", id, author_id);

        self.get(&id)
            .await?
            .ok_or_else(|| PortalError::internal("Actualité vanished after insert"))
    }

    /// Applies the provided fields; `None` when no such item exists.
    pub async fn update(
        &self,
        id: &str,
        req: UpdateActualiteRequest,
    ) -> PortalResult<Option<Actualite>> {
        let Some(mut item) = self.get(id).await? else {
            return Ok(None);
        };

        if let Some(ref title) = req.title {
            item.title = validation::required(title, "Title is required")?;
        }
        if let Some(ref content) = req.content {
            item.content = validation::required(content, "Content is required")?;
        }
        if req.image_url.is_some() {
            // blank resets to the default picture
            item.image_url =
                validation::optional(req.image_url).unwrap_or_else(|| self.default_image.clone());
        }
        if let Some(date) = req.date {
            item.date = date;
        }

        sqlx::query(
            r#"
            UPDATE actualites
            SET title = ?, content = ?, image_url = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(&item.title)
        .bind(&item.content)
        .bind(&item.image_url)
        .bind(item.date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(item))
    }

    pub async fn delete(&self, id: &str) -> PortalResult<bool> {
        let result = sqlx::query("DELETE FROM actualites WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
