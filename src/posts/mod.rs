// src/posts/mod.rs
pub mod handlers;
pub mod store;
pub mod types;

pub use handlers::posts_router;
pub use store::PostStore;
pub use types::{CreatePostRequest, LikesResponse, Post, UpdatePostRequest};
