//! Pool construction and schema bootstrap.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Embedded schema, applied idempotently on connect.
const SCHEMA: &str = include_str!("schema.sql");

/// Connects to the database at `url` and ensures the schema exists.
///
/// Foreign key enforcement is switched on for every connection; cascade
/// deletes depend on it. In-memory databases are pinned to a single
/// never-idle connection, since each SQLite connection would otherwise see
/// its own empty database.
///
/// # Errors
///
/// Returns any sqlx connection or DDL failure.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?
    };

    sqlx::raw_sql(SCHEMA).execute(&pool).await?;
    tracing::debug!(url = %url, "database schema ensured");
    Ok(pool)
}

/// Connects to a fresh in-memory database (tests and dev default).
///
/// # Errors
///
/// Returns any sqlx connection or DDL failure.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    connect("sqlite::memory:").await
}
