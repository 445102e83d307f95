// src/news/mod.rs
pub mod handlers;
pub mod store;
pub mod types;

pub use handlers::news_router;
pub use store::NewsStore;
pub use types::{Actualite, CreateActualiteRequest, UpdateActualiteRequest};
