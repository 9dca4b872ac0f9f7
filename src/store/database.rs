/// SQLite database bootstrap
///
/// Opens the connection pool, applies the embedded migrations and loads the
/// default laboratory fixture into an empty database.

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Row,
};
use std::{str::FromStr, time::Duration};

/// Default fixture: users, the three standard processes, one workflow and its worksheets
const SEED_SQL: &str = include_str!("../../seeds/default.sql");

/// How long a writer waits for the SQLite write lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Owner of the shared connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database file described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            anyhow::anyhow!("Failed to create data directory '{}': {}", config.data_dir, e)
        })?;
        let db_path = config.db_path();

        tracing::info!("🗄️ Opening database pool: {}", db_path.display());

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Private in-memory database on a single pinned connection, already migrated
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        // Every connection to :memory: is a separate database, so the pool must never
        // open a second one or recycle the first.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Apply pending schema migrations from `migrations/`
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("📋 Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Load the default fixture when the users table is empty
    ///
    /// Returns whether anything was inserted. Runs in one transaction so a
    /// half-seeded database is never left behind.
    pub async fn seed_if_empty(&self) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let users: i64 = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(&mut *tx)
            .await?
            .get("n");
        if users > 0 {
            tracing::debug!("Database already holds {} users, skipping seed", users);
            return Ok(false);
        }

        sqlx::raw_sql(SEED_SQL).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!("🌱 Seeded default laboratory fixture");
        Ok(true)
    }

    /// Shared connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close database connections gracefully
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
