//! Persistence layer for the festival registration backend.
//!
//! - [`models`]: row structs and DTOs for the four entity tables.
//! - [`repositories`]: zero-sized query structs over a `PgPool`.
//! - [`registry`]: the [`Registry`](registry::Registry) trait with its
//!   PostgreSQL and in-memory backings.
//! - [`seed`]: the teams and programs every fresh store starts with.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod registry;
pub mod repositories;
pub mod seed;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
