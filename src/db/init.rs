// Database initialization and migration handling
use std::path::Path;

use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};

use super::migrations::MIGRATION_001;
use super::KeyValueStore;
use crate::error::Result;

/// SQLite-backed lookup cache store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db_url = format!("sqlite:{}?mode=rwc", path.display());

        log::info!("Initializing database at: {}", path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        // Enable WAL mode for better performance
        sqlx::query("PRAGMA journal_mode=WAL;").execute(&pool).await?;

        run_migrations(&pool).await?;

        log::info!("Database initialization complete");
        Ok(Self { pool })
    }

    /// Private in-memory database, mostly for tests
    pub async fn in_memory() -> Result<Self> {
        // A single connection; each new one would see an empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query("SELECT COUNT(*) as count FROM lookup_cache")
            .fetch_one(&self.pool)
            .await?
            .get("count");
        Ok(count)
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM lookup_cache WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn put(&mut self, key: &str, value: String) -> Result<()> {
        sqlx::query(
            "INSERT INTO lookup_cache (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let found = sqlx::query("SELECT 1 FROM lookup_cache WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    async fn entries(&self) -> Result<Vec<(String, String)>> {
        let rows = sqlx::query("SELECT key, value FROM lookup_cache ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.get("key"), row.get("value")))
            .collect())
    }
}

/// Run all pending migrations
async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let applied: bool =
        sqlx::query("SELECT COUNT(*) as count FROM _migrations WHERE name = 'migration_001'")
            .fetch_one(pool)
            .await
            .map(|row| row.get::<i64, _>("count") > 0)?;

    if applied {
        return Ok(());
    }

    log::info!("Applying migration_001...");

    // SQLite doesn't run multiple statements in one query
    for statement in MIGRATION_001.split(';') {
        let stmt: String = statement
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let stmt = stmt.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt).execute(pool).await?;
        }
    }

    sqlx::query("INSERT INTO _migrations (name, applied_at) VALUES ('migration_001', datetime('now'))")
        .execute(pool)
        .await?;

    log::info!("Migration 001 applied successfully");
    Ok(())
}
