//! SQLite-backed persistence for rankings, quiz reference data, taste
//! results, and taste analyses.

use crate::error::{Result, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

/// Store owning the connection pool. Engines and services clone the pool.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) a database file and run migrations.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Open(format!("create {}: {e}", parent.display())))?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Open(e.to_string()))?;
        Self::with_pool(pool).await
    }

    /// In-memory database for tests. A single connection keeps every handle
    /// on the same database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Open(e.to_string()))?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        init_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Seed the quiz reference tables (idempotent; run once at startup).
    pub async fn seed_quiz_reference(&self) -> Result<crate::quiz::SeedReport> {
        crate::quiz::seed_reference_data(&self.pool).await
    }
}

async fn init_schema(pool: &SqlitePool) -> Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS users_ranking (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             user_id TEXT NOT NULL,
             shop_id INTEGER NOT NULL,
             satisfaction_tier INTEGER NOT NULL,
             rank INTEGER NOT NULL,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL,
             UNIQUE(user_id, shop_id)
         )",
        "CREATE INDEX IF NOT EXISTS idx_users_ranking_user_tier
             ON users_ranking(user_id, satisfaction_tier, rank)",
        "CREATE TABLE IF NOT EXISTS quiz_clusters (
             cluster_id INTEGER PRIMARY KEY,
             name TEXT NOT NULL,
             tagline TEXT NOT NULL,
             medoid_value TEXT NOT NULL,
             updated_at TEXT NOT NULL
         )",
        "CREATE TABLE IF NOT EXISTS quiz_matches (
             vector TEXT PRIMARY KEY,
             cluster_id INTEGER NOT NULL
         )",
        "CREATE TABLE IF NOT EXISTS taste_results (
             user_id TEXT PRIMARY KEY,
             cluster_id INTEGER NOT NULL,
             taste_type TEXT NOT NULL,
             scores TEXT NOT NULL,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         )",
        "CREATE TABLE IF NOT EXISTS taste_analyses (
             id TEXT PRIMARY KEY,
             user_id TEXT NOT NULL UNIQUE,
             share_code TEXT NOT NULL,
             taste_type TEXT NOT NULL,
             taste_scores TEXT NOT NULL,
             ranked_shops_summary TEXT NOT NULL,
             analysis TEXT NOT NULL,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         )",
        "CREATE INDEX IF NOT EXISTS idx_taste_analyses_share_code
             ON taste_analyses(share_code)",
    ];
    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
    }
    Ok(())
}
