// src/comments/mod.rs
pub mod handlers;
pub mod store;
pub mod types;

pub use handlers::comments_router;
pub use store::CommentStore;
pub use types::{Comment, CreateCommentRequest};
