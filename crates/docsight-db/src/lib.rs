//! Document store backed by SQLite.
//!
//! Migrations live in the workspace `migrations/` directory and are embedded at build time.

pub mod document;

pub use document::DocumentRepository;

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply pending migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
