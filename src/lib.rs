// src/lib.rs

pub mod admin;
pub mod api;
pub mod auth;
pub mod cli;
pub mod comments;
pub mod config;
pub mod db;
pub mod error;
pub mod home;
pub mod news;
pub mod posts;
pub mod state;
pub mod validation;

pub use api::create_router;
pub use config::{PortalConfig, CONFIG};
pub use error::{PortalError, PortalResult};
pub use state::AppState;
