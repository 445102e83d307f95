//! Database pool configuration and migrations

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

/// Create the SQLite connection pool.
///
/// Foreign keys are enforced on every connection so that deleting a post
/// takes its comments and likes with it. In-memory databases are limited
/// to a single connection, since each connection would otherwise see its
/// own empty database.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let mut options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("Invalid DATABASE_URL: {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(config.timeout));

    let (pool_options, max_connections) = if config.is_in_memory() {
        // closing the only connection would drop the database
        let pool_options = pool_options.max_lifetime(None).idle_timeout(None);
        (pool_options.max_connections(1), 1)
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
        let pool_options = pool_options
            // Recycle connections periodically
            .max_lifetime(Duration::from_secs(1800))
            .idle_timeout(Duration::from_secs(600));
        (
            pool_options.max_connections(config.max_connections),
            config.max_connections,
        )
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    info!("Connected to database ({} max connections)", max_connections);
    Ok(pool)
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    info!("Migrations complete");
    Ok(())
}

/// Connect and migrate in one step.
pub async fn init(config: &DatabaseConfig) -> Result<SqlitePool> {
    let pool = connect(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn ping(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}

/// Number of successfully applied migrations
pub async fn schema_version(pool: &SqlitePool) -> Result<i64> {
    let result: Option<(i64,)> =
        sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_optional(pool)
            .await?;

    Ok(result.map(|(c,)| c).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 8,
            timeout: 5,
        }
    }

    #[tokio::test]
    async fn test_init_applies_schema() {
        let pool = init(&memory_config()).await.unwrap();

        assert!(ping(&pool).await);
        assert!(schema_version(&pool).await.unwrap() >= 1);

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        for expected in ["actualites", "comments", "post_likes", "posts", "users"] {
            assert!(names.contains(&expected), "missing table {expected}");
        }
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections: 2,
            timeout: 5,
        };

        let pool = init(&config).await.unwrap();
        assert!(ping(&pool).await);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = init(&memory_config()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        assert_eq!(schema_version(&pool).await.unwrap(), 1);
    }
}
