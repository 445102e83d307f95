// src/config/server.rs
// Server, database, auth and content configuration

use serde::{Deserialize, Serialize};

use super::helpers::{env_opt, env_or, env_parsed_or};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or("PORTAL_HOST", "127.0.0.1"),
            port: env_parsed_or("PORTAL_PORT", 5000),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub timeout: u64,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_or("DATABASE_URL", "sqlite:./ensa.db"),
            max_connections: env_parsed_or("PORTAL_DB_MAX_CONNECTIONS", 5),
            timeout: env_parsed_or("DATABASE_TIMEOUT", 10),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Token signing and password hashing
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env_or("JWT_SECRET", ""),
            token_ttl_seconds: env_parsed_or("JWT_EXPIRY_SECONDS", 360_000),
            bcrypt_cost: env_parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
        }
    }
}

// Keep the secret out of logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// HTTP layer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// `*` allows any origin, otherwise a comma separated list
    pub cors_origin: String,
    pub request_timeout_seconds: u64,
    /// Directory holding the built single-page front end, if served by us
    pub static_dir: Option<String>,
}

impl HttpConfig {
    pub fn from_env() -> Self {
        Self {
            cors_origin: env_or("CORS_ORIGIN", "*"),
            request_timeout_seconds: env_parsed_or("REQUEST_TIMEOUT_SECONDS", 30),
            static_dir: env_opt("STATIC_DIR"),
        }
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origin
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env_or("PORTAL_LOG_LEVEL", "info"),
        }
    }
}

/// Content defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub default_news_image: String,
    pub home_news_count: i64,
}

impl ContentConfig {
    pub fn from_env() -> Self {
        Self {
            default_news_image: env_or("DEFAULT_NEWS_IMAGE", "/images/news-default.jpg"),
            home_news_count: env_parsed_or("HOME_NEWS_COUNT", 3),
        }
    }
}
