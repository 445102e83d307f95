// src/news/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A news item ("actualité") published by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Actualite {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub image_url: String,
    /// Authoring user; cleared if that account is deleted
    pub author: Option<String>,
    pub author_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActualiteRequest {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    /// Publication date, now when omitted
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActualiteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}
