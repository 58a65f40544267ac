//! SQLite database service
//!
//! Owns the connection pool for the roster database. File databases run in
//! WAL mode; in-memory databases are used by tests and `--in-memory` runs.
//! All schema definitions and migrations are managed here.

pub mod error;
mod migrations;
pub mod repositories;
mod repository_impl;
pub mod schema;
mod seed;

pub use error::SqliteError;
pub use seed::seed_sample_data;
pub use sqlx::SqlitePool;

use std::str::FromStr;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::log::LevelFilter;

use crate::core::config::DatabaseConfig;
use crate::core::constants::{SQLITE_BUSY_TIMEOUT_SECS, SQLITE_CACHE_SIZE, SQLITE_DB_FILENAME};
use crate::core::storage::{AppStorage, DataSubdir};

/// SQLite database service
///
/// Handles database initialization and connection pooling.
/// Created once at startup and shared via `Arc`.
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Initialize the database service from configuration
    ///
    /// Uses `database.path` when set, otherwise `sqlite/roster.db` under the
    /// data directory. Runs any pending migrations.
    pub async fn init(config: &DatabaseConfig, storage: &AppStorage) -> Result<Self, SqliteError> {
        if config.in_memory {
            return Self::in_memory().await;
        }

        let db_path = match &config.path {
            Some(path) => path.clone(),
            None => storage.subdir(DataSubdir::Sqlite).join(SQLITE_DB_FILENAME),
        };
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = base_options(SqliteConnectOptions::new().filename(&db_path))
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let service = Self::connect(options, config.max_connections).await?;
        tracing::debug!(path = %db_path.display(), "SqliteService initialized");
        Ok(service)
    }

    /// Open a private in-memory database with the current schema
    ///
    /// Uses a single connection that never expires, so the database lives as
    /// long as the service.
    pub async fn in_memory() -> Result<Self, SqliteError> {
        let options = base_options(SqliteConnectOptions::from_str("sqlite::memory:")?);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        tracing::debug!("SqliteService initialized (in-memory)");
        Ok(Self { pool })
    }

    async fn connect(options: SqliteConnectOptions, max_connections: u32) -> Result<Self, SqliteError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}

/// Pragmas shared by file and in-memory databases
///
/// `case_sensitive_like` keeps `LIKE` prefix matches consistent with
/// in-memory `starts_with`.
fn base_options(options: SqliteConnectOptions) -> SqliteConnectOptions {
    options
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
        .pragma("cache_size", SQLITE_CACHE_SIZE)
        .pragma("temp_store", "MEMORY")
        .pragma("case_sensitive_like", "ON")
        .log_statements(LevelFilter::Trace)
}
