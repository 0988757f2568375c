//! Shared database types and startup plumbing.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::error::StoreError;

/// A type alias for the database connection pool (`Pool<Postgres>`).
/// This is used throughout the application to provide a consistent, clear name
/// for the shared database connection state.
pub type DbPool = Pool<Postgres>;

/// Opens the pool with a short acquire timeout so an unreachable database
/// fails fast at startup instead of hanging the boot sequence.
pub async fn connect(url: &str) -> Result<DbPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;
    Ok(pool)
}

/// Creates the two tables if missing. The schema is small enough that plain
/// idempotent DDL at startup beats a migration framework.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS media_items (
            list_name TEXT NOT NULL,
            position  INT  NOT NULL,
            kind      TEXT NOT NULL,
            content   TEXT NOT NULL,
            name      TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (list_name, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            user_id        BIGINT PRIMARY KEY,
            active         BOOLEAN NOT NULL,
            username       TEXT NOT NULL,
            workload       TEXT,
            checked_in_at  TIMESTAMPTZ,
            checked_out_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
