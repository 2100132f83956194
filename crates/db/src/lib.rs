//! Persistence layer for camps, bookings, and users.
//!
//! Provides pool construction (with the startup retry loop), a health
//! check, embedded migrations, row models, and repositories.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await
}

/// Keep trying to create a pool until it succeeds, sleeping `retry_interval`
/// between attempts. Never gives up.
pub async fn connect_with_retry(
    database_url: &str,
    max_connections: u32,
    retry_interval: Duration,
) -> DbPool {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match create_pool(database_url, max_connections).await {
            Ok(pool) => {
                tracing::info!(attempt, "Database connection established");
                return pool;
            }
            Err(e) => {
                tracing::error!(
                    attempt,
                    error = %e,
                    retry_in_secs = retry_interval.as_secs(),
                    "Database connection failed, retrying",
                );
                tokio::time::sleep(retry_interval).await;
            }
        }
    }
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
