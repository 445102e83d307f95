// src/posts/store.rs

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use super::types::{CreatePostRequest, Post, PostRow, UpdatePostRequest};
use crate::auth::User;
use crate::error::{PortalError, PortalResult};
use crate::validation;

const SELECT_POST: &str = r#"
    SELECT p.id, p.author, p.name, p.title, p.text, p.date,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
    FROM posts p
"#;

pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> PortalResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{SELECT_POST} ORDER BY p.date DESC, p.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let like_rows: Vec<(String, String)> =
            sqlx::query_as("SELECT post_id, user_id FROM post_likes ORDER BY date DESC")
                .fetch_all(&self.pool)
                .await?;

        let mut likes: HashMap<String, Vec<String>> = HashMap::new();
        for (post_id, user_id) in like_rows {
            likes.entry(post_id).or_default().push(user_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let post_likes = likes.remove(&row.id).unwrap_or_default();
                row.with_likes(post_likes)
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> PortalResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let likes = self.likes(&row.id).await?;
                Ok(Some(row.with_likes(likes)))
            }
            None => Ok(None),
        }
    }

    pub async fn exists(&self, id: &str) -> PortalResult<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }

    pub async fn create(&self, author: &User, req: CreatePostRequest) -> PortalResult<Post> {
        let title = validation::required(&req.title, "Title is required")?;
        let text = validation::required(&req.text, "Text is required")?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO posts (id, author, name, title, text, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&author.id)
        .bind(&author.name)
        .bind(&title)
        .bind(&text)
        .bind(now)
        .execute(&self.pool)
        .await?;

        info!("Post {} created by {}", id, author.id);

        Ok(Post {
            id,
            author: author.id.clone(),
            name: author.name.clone(),
            title,
            text,
            date: now,
            likes: Vec::new(),
            comment_count: 0,
        })
    }

    /// Owner or admin only.
    pub async fn update(&self, actor: &User, id: &str, req: UpdatePostRequest) -> PortalResult<Post> {
        let mut post = self.owned_post(actor, id).await?;

        if let Some(ref title) = req.title {
            post.title = validation::required(title, "Title is required")?;
        }
        if let Some(ref text) = req.text {
            post.text = validation::required(text, "Text is required")?;
        }

        sqlx::query("UPDATE posts SET title = ?, text = ? WHERE id = ?")
            .bind(&post.title)
            .bind(&post.text)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(post)
    }

    /// Owner or admin only. Comments and likes go with the post.
    pub async fn delete(&self, actor: &User, id: &str) -> PortalResult<()> {
        self.owned_post(actor, id).await?;

        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!("Post {} removed by {}", id, actor.id);
        Ok(())
    }

    pub async fn like(&self, user: &User, id: &str) -> PortalResult<Vec<String>> {
        self.require_post(id).await?;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO post_likes (post_id, user_id, date) VALUES (?, ?, ?)",
        )
        .bind(id)
        .bind(&user.id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PortalError::validation("Post already liked"));
        }

        self.likes(id).await
    }

    pub async fn unlike(&self, user: &User, id: &str) -> PortalResult<Vec<String>> {
        self.require_post(id).await?;

        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
            .bind(id)
            .bind(&user.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PortalError::validation("Post has not yet been liked"));
        }

        self.likes(id).await
    }

    /// Most recent like first
    async fn likes(&self, id: &str) -> PortalResult<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT user_id FROM post_likes WHERE post_id = ? ORDER BY date DESC")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(user_id,)| user_id).collect())
    }

    async fn require_post(&self, id: &str) -> PortalResult<()> {
        if !self.exists(id).await? {
            return Err(PortalError::not_found("Post not found"));
        }
        Ok(())
    }

    async fn owned_post(&self, actor: &User, id: &str) -> PortalResult<Post> {
        let post = self
            .get(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Post not found"))?;

        if post.author != actor.id && !actor.is_admin() {
            return Err(PortalError::forbidden("User not authorized"));
        }

        Ok(post)
    }
}
