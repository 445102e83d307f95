// src/auth/guard.rs
//
// Request extractors acting as route guards. `AuthUser` admits any signed-in
// account, `AdminUser` only accounts whose stored role is admin. The role is
// read from the database on every request, so a demotion takes effect
// before the token expires.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::models::User;
use crate::api::error::ApiError;
use crate::state::AppState;

/// Header set by the front end's axios defaults
pub const TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// Token from `x-auth-token`, or from `Authorization: Bearer <token>`.
pub fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(value) = parts.headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        let token = value.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)
            .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

        let claims = state.auth_service.verify_token(&token).map_err(|e| {
            debug!("Rejected token on {}: {}", parts.uri.path(), e);
            ApiError::unauthorized("Token is not valid")
        })?;

        match state.auth_service.find_user(&claims.sub).await? {
            Some(user) => Ok(AuthUser(user)),
            None => {
                warn!("Token for deleted user {} on {}", claims.sub, parts.uri.path());
                Err(ApiError::unauthorized("Token is not valid"))
            }
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            warn!("User {} denied admin access to {}", user.id, parts.uri.path());
            return Err(ApiError::forbidden("Admin access required"));
        }

        Ok(AdminUser(user))
    }
}
