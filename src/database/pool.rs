use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)"#;

const CREATE_NOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES users (id),
    title TEXT NOT NULL,
    description TEXT,
    category TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'completed')),
    is_pinned BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)"#;

// Covers the list query: owner scope, pinned first, newest first
const CREATE_NOTES_LIST_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS notes_owner_list_idx
    ON notes (owner_id, is_pinned DESC, created_at DESC)"#;

/// Build the shared connection pool. The pool connects lazily so the
/// process can start (and report a degraded /health) while the database
/// is unreachable.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_lazy(&config.url)
}

/// Create the tables and indexes if they do not exist yet
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_NOTES_TABLE).execute(pool).await?;
    sqlx::query(CREATE_NOTES_LIST_INDEX).execute(pool).await?;
    info!("database schema initialized");
    Ok(())
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
