// src/posts/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A blog post written by any signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub author: String,
    /// Author's display name when the post was written
    pub name: String,
    pub title: String,
    pub text: String,
    pub date: DateTime<Utc>,
    /// Ids of the users who liked the post
    pub likes: Vec<String>,
    pub comment_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct PostRow {
    pub id: String,
    pub author: String,
    pub name: String,
    pub title: String,
    pub text: String,
    pub date: DateTime<Utc>,
    pub comment_count: i64,
}

impl PostRow {
    pub(crate) fn with_likes(self, likes: Vec<String>) -> Post {
        Post {
            id: self.id,
            author: self.author,
            name: self.name,
            title: self.title,
            text: self.text,
            date: self.date,
            likes,
            comment_count: self.comment_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikesResponse {
    pub likes: Vec<String>,
}
