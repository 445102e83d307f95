// src/api/mod.rs

pub mod error;
pub mod health;
pub mod router;

pub use error::{ApiError, ApiResult};
pub use router::{api_router, create_router};
