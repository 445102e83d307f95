// src/auth/jwt.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::models::{Role, User};
use crate::config::AuthConfig;
use crate::error::{PortalError, PortalResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // user_id
    pub role: Role,         // role at issue time; guards re-check storage
    pub exp: usize,         // expiration timestamp
    pub iat: usize,         // issued at timestamp
}

/// HS256 signing keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::seconds(config.token_ttl_seconds),
        }
    }

    pub fn create_token(&self, user: &User) -> PortalResult<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| PortalError::internal("Failed to calculate expiration"))?;

        let claims = Claims {
            sub: user.id.clone(),
            role: user.role,
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> PortalResult<String> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| PortalError::internal(format!("Failed to create token: {e}")))
    }

    pub fn verify_token(&self, token: &str) -> PortalResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| PortalError::unauthorized("Token is not valid"))
    }
}
