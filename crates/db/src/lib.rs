//! Persistence for jotter.
//!
//! The rest of the application only sees the [`DataClient`] contract in
//! [`client`]. Two implementations are provided: [`pg::PgDataClient`] over a
//! PostgreSQL pool, and [`memory::MemoryDataClient`] for tests and
//! throwaway development runs.

use sqlx::postgres::PgPoolOptions;

pub mod client;
pub mod memory;
pub mod models;
pub mod pg;
pub mod repositories;

pub use client::{ClientError, ClientResult, DataClient, Direction, Order, Table};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
