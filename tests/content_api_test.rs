// tests/content_api_test.rs

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_news_crud_is_admin_only() {
    let app = common::spawn_app().await;
    let admin = app.register_admin("Direction", "direction@ensa.ma").await;
    let user = app.register("Etudiant", "etudiant@ensa.ma").await;

    let news = json!({
        "title": "Nouveau Programme de Master",
        "content": "L'ENSA lance un nouveau programme de master en Intelligence Artificielle et Data Science."
    });

    let (status, _) = app.post("/api/actualites", Some(&user), news.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.post("/api/actualites", None, news.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, created) = app.post("/api/actualites", Some(&admin), news).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["imageUrl"], "/images/news-default.jpg");
    assert_eq!(created["authorName"], "Direction");
    let id = created["_id"].as_str().unwrap().to_string();

    // public reads
    let (status, listed) = app.get("/api/actualites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let (status, fetched) = app.get(&format!("/api/actualites/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Nouveau Programme de Master");

    let (status, _) = app
        .put(&format!("/api/actualites/{id}"), Some(&user), json!({ "title": "x" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app
        .put(
            &format!("/api/actualites/{id}"),
            Some(&admin),
            json!({ "imageUrl": "/images/news1.jpg" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["imageUrl"], "/images/news1.jpg");
    assert_eq!(updated["title"], "Nouveau Programme de Master");

    let (status, _) = app.delete(&format!("/api/actualites/{id}"), Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&format!("/api/actualites/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/api/actualites/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Actualité not found");
}

#[tokio::test]
async fn test_news_requires_title_and_content() {
    let app = common::spawn_app().await;
    let admin = app.register_admin("Direction", "direction@ensa.ma").await;

    let (status, body) = app
        .post("/api/actualites", Some(&admin), json!({ "title": "  ", "content": "texte" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title is required");

    let (status, _) = app
        .post("/api/actualites", Some(&admin), json!({ "title": "Titre" }))
        .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_home_shows_latest_three_news() {
    let app = common::spawn_app().await;
    let admin = app.register_admin("Direction", "direction@ensa.ma").await;

    for day in 1..=4 {
        let (status, _) = app
            .post(
                "/api/actualites",
                Some(&admin),
                json!({
                    "title": format!("Actualité {day}"),
                    "content": "Contenu",
                    "date": format!("2024-03-0{day}T10:00:00Z")
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, home) = app.get("/api/home", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["hero"]["title"], "Bienvenue à l'ENSA");
    assert_eq!(home["quickLinks"].as_array().unwrap().len(), 3);

    let titles: Vec<_> = home["latestNews"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Actualité 4", "Actualité 3", "Actualité 2"]);

    let (_, limited) = app.get("/api/actualites?limit=1", None).await;
    assert_eq!(limited.as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/actualites?limit=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_blog_posts_likes_and_comments() {
    let app = common::spawn_app().await;
    let author = app.register("Sara", "sara@ensa.ma").await;
    let reader = app.register("Omar", "omar@ensa.ma").await;
    let admin = app.register_admin("Direction", "direction@ensa.ma").await;
    let reader_id = app.user_id(&reader).await;

    let (status, _) = app
        .post("/api/posts", None, json!({ "title": "Club", "text": "Bienvenue" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, post) = app
        .post("/api/posts", Some(&author), json!({ "title": "Club robotique", "text": "Inscriptions ouvertes" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["name"], "Sara");
    let id = post["_id"].as_str().unwrap().to_string();

    // likes
    let (status, likes) = app.put(&format!("/api/posts/{id}/like"), Some(&reader), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(likes["likes"], json!([reader_id]));
    let (status, body) = app.put(&format!("/api/posts/{id}/like"), Some(&reader), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Post already liked");

    // comments
    let (status, comment) = app
        .post(&format!("/api/posts/{id}/comments"), Some(&reader), json!({ "text": "Super initiative" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["post"], id.as_str());
    let comment_id = comment["_id"].as_str().unwrap().to_string();

    let (status, comments) = app.get(&format!("/api/posts/{id}/comments"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments.as_array().unwrap().len(), 1);

    let (_, fetched) = app.get(&format!("/api/posts/{id}"), None).await;
    assert_eq!(fetched["commentCount"], 1);
    assert_eq!(fetched["likes"].as_array().unwrap().len(), 1);

    let (status, _) = app.delete(&format!("/api/comments/{comment_id}"), Some(&author)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&format!("/api/comments/{comment_id}"), Some(&reader)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // editing
    let (status, _) = app
        .put(&format!("/api/posts/{id}"), Some(&reader), json!({ "title": "Pirate" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, edited) = app
        .put(&format!("/api/posts/{id}"), Some(&author), json!({ "text": "Inscriptions closes" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["text"], "Inscriptions closes");

    // moderation by an admin
    let (status, _) = app.delete(&format!("/api/posts/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&format!("/api/posts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/api/posts/{id}/comments"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_list_public() {
    let app = common::spawn_app().await;
    let author = app.register("Sara", "sara@ensa.ma").await;

    for title in ["Premier", "Second"] {
        app.post("/api/posts", Some(&author), json!({ "title": title, "text": "..." }))
            .await;
    }

    let (status, posts) = app.get("/api/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(posts.as_array().unwrap().len(), 2);

    let (status, body) = app.put("/api/posts/missing/unlike", Some(&author), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
}
