//! Schema definitions and migration utilities.
//!
//! The schema is embedded at compile time and applied on connect when
//! `StoreConfig::run_migrations` is set.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the notebook document table (001_notebooks.sql).
pub const NOTEBOOKS_MIGRATION: &str = include_str!("../../../migrations/001_notebooks.sql");

/// Run all pending migrations against the database.
///
/// This function is idempotent - it can be run multiple times safely.
/// Migrations check for existing objects before creating them.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running notebooks migration (001_notebooks.sql)...");
    sqlx::raw_sql(NOTEBOOKS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Notebooks migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}
