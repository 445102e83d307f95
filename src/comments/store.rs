// src/comments/store.rs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::types::{Comment, CreateCommentRequest};
use crate::auth::User;
use crate::error::{PortalError, PortalResult};
use crate::validation;

pub struct CommentStore {
    pool: SqlitePool,
}

impl CommentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Comments on a post, oldest first. Unknown posts are a not-found error.
    pub async fn list_for_post(&self, post_id: &str) -> PortalResult<Vec<Comment>> {
        self.require_post(post_id).await?;

        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, author, name, text, date
            FROM comments
            WHERE post_id = ?
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn create(
        &self,
        author: &User,
        post_id: &str,
        req: CreateCommentRequest,
    ) -> PortalResult<Comment> {
        let text = validation::required(&req.text, "Text is required")?;
        self.require_post(post_id).await?;

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            post_id: post_id.to_string(),
            author: author.id.clone(),
            name: author.name.clone(),
            text,
            date: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author, name, text, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.post_id)
        .bind(&comment.author)
        .bind(&comment.name)
        .bind(&comment.text)
        .bind(comment.date)
        .execute(&self.pool)
        .await?;

        info!("Comment {} added to post {} by {}", comment.id, post_id, author.id);
        Ok(comment)
    }

    /// Comment author or admin only.
    pub async fn delete(&self, actor: &User, id: &str) -> PortalResult<()> {
        let author: Option<(String,)> = sqlx::query_as("SELECT author FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some((author,)) = author else {
            return Err(PortalError::not_found("Comment does not exist"));
        };
        if author != actor.id && !actor.is_admin() {
            return Err(PortalError::forbidden("User not authorized"));
        }

        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn require_post(&self, post_id: &str) -> PortalResult<()> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE id = ?")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        if count.0 == 0 {
            return Err(PortalError::not_found("Post not found"));
        }
        Ok(())
    }
}
