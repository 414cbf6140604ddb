//! Persistence for trip availability planning.
//!
//! Models mirror table rows; repositories are zero-sized structs whose
//! methods take `&PgPool` first. Multi-statement writes run in a single
//! transaction and are wrapped by [`retry::with_conflict_retry`] at the
//! call site.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod retry;

pub use retry::{with_conflict_retry, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
