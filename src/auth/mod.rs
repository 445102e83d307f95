// src/auth/mod.rs

pub mod guard;
pub mod handlers;
pub mod jwt;
pub mod models;
pub mod password;
pub mod service;

pub use guard::{AdminUser, AuthUser};
pub use jwt::{Claims, JwtKeys};
pub use models::{
    AuthResponse, LoginRequest, RegisterRequest, Role, RoleChangeRequest, UpdateSettingsRequest,
    User,
};
pub use password::{hash_password, verify_password};
pub use service::AuthService;
