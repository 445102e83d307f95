// src/config/mod.rs
// Central configuration for the portal, composed from domain configs

pub mod helpers;
pub mod server;

use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use server::{AuthConfig, ContentConfig, DatabaseConfig, HttpConfig, LoggingConfig, ServerConfig};

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<PortalConfig> = Lazy::new(PortalConfig::from_env);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub content: ContentConfig,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        // Don't fail if .env doesn't exist (production uses real env vars)
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            http: HttpConfig::from_env(),
            logging: LoggingConfig::from_env(),
            content: ContentConfig::from_env(),
        }
    }

    /// In-memory database, fixed secret and the cheapest bcrypt cost.
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                timeout: 5,
            },
            auth: AuthConfig {
                jwt_secret: "ensa-portal-test-secret".to_string(),
                token_ttl_seconds: 3600,
                bcrypt_cost: 4,
            },
            http: HttpConfig {
                cors_origin: "*".to_string(),
                request_timeout_seconds: 30,
                static_dir: None,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
            content: ContentConfig {
                default_news_image: "/images/news-default.jpg".to_string(),
                home_news_count: 3,
            },
        }
    }

    /// Validate config on startup
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must be set");
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {}", self.auth.bcrypt_cost);
        }
        if self.auth.token_ttl_seconds <= 0 {
            bail!("JWT_EXPIRY_SECONDS must be positive");
        }
        if self.database.max_connections == 0 {
            bail!("PORTAL_DB_MAX_CONNECTIONS must be at least 1");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        self.server.bind_address()
    }
}
