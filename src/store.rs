//! Pool construction and table DDL for the `users` table.

use crate::config::DatabaseConfig;
use crate::error::{AppError, ConfigError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub const USERS_TABLE: &str = "users";

/// Open the pool described by `config`, creating the database file if missing.
///
/// An in-memory database lives only as long as its connection, so such URLs get a
/// single connection that is never reaped.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: config.url.clone(),
            reason: e.to_string(),
        })?
        .create_if_missing(true);

    let pool = if is_in_memory(&config.url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(opts)
            .await?
    };
    tracing::debug!(url = %config.url, "database pool opened");
    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Create the `users` table and its index if they do not exist. Idempotent.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    // AUTOINCREMENT keeps ids of deleted rows from being handed out again.
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {USERS_TABLE} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            age INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS ix_{USERS_TABLE}_name ON {USERS_TABLE} (name)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}

/// Round-trip a trivial query; used by the readiness check.
pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}
