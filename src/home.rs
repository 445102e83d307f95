// src/home.rs
// Landing page ("Accueil") content: hero, quick links and latest news

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::news::Actualite;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub tagline: String,
    pub background_image: String,
    pub actions: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickLink {
    pub title: String,
    pub description: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub hero: Hero,
    pub quick_links: Vec<QuickLink>,
    pub latest_news: Vec<Actualite>,
}

fn link(label: &str, to: &str) -> Link {
    Link {
        label: label.to_string(),
        to: to.to_string(),
    }
}

fn quick_link(title: &str, description: &str, to: &str) -> QuickLink {
    QuickLink {
        title: title.to_string(),
        description: description.to_string(),
        to: to.to_string(),
    }
}

pub fn hero() -> Hero {
    Hero {
        title: "Bienvenue à l'ENSA".to_string(),
        tagline: "Découvrez l'excellence académique et l'innovation technologique".to_string(),
        background_image: "/images/hero-banner.jpg".to_string(),
        actions: vec![
            link("Postuler Maintenant", "/admission"),
            link("Découvrir nos Formations", "/formations"),
        ],
    }
}

pub fn quick_links() -> Vec<QuickLink> {
    vec![
        quick_link(
            "Nos Formations",
            "Découvrez nos programmes d'ingénierie et de recherche",
            "/formations",
        ),
        quick_link(
            "Admission",
            "Informations sur les conditions d'admission et les inscriptions",
            "/admission",
        ),
        quick_link(
            "Actualités",
            "Restez informé des dernières nouvelles de l'école",
            "/actualites",
        ),
    ]
}

/// `GET /api/home`
pub async fn home_handler(State(app_state): State<Arc<AppState>>) -> ApiResult<Json<HomePage>> {
    let latest_news = app_state
        .news_store
        .list(Some(app_state.config.content.home_news_count))
        .await?;

    Ok(Json(HomePage {
        hero: hero(),
        quick_links: quick_links(),
        latest_news,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_links_point_at_client_routes() {
        let links = quick_links();
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.to.starts_with('/')));
        assert!(links.iter().any(|l| l.to == "/actualites"));
    }

    #[test]
    fn test_hero_serializes_camel_case() {
        let json = serde_json::to_value(hero()).unwrap();
        assert_eq!(json["title"], "Bienvenue à l'ENSA");
        assert_eq!(json["backgroundImage"], "/images/hero-banner.jpg");
        assert_eq!(json["actions"].as_array().unwrap().len(), 2);
    }
}
