//! SQLite archive connection
//!
//! One pool serves both the site's historical-record tables, which lineage
//! only reads, and the link and settings tables it migrates itself.

use crate::storage::migrations;
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a fan-out reader waits on an admin write before failing
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(2);

const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// Upper bound on concurrent collection queries hitting the file
    pub max_connections: u32,
    /// Apply pending link/settings migrations on open
    pub auto_migrate: bool,
    pub busy_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            auto_migrate: true,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl DatabaseConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Private in-memory archive; a single connection so every query sees
    /// the same database
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(MEMORY_PATH),
            max_connections: 1,
            ..Default::default()
        }
    }

    /// Build from the `[database]` section of the application config
    pub fn from_config(config: &crate::config::Config) -> Self {
        let base = match &config.database.path {
            Some(path) => Self::with_path(path.clone()),
            None => Self::default(),
        };
        base.max_connections(config.database.max_connections)
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Open without touching the schema, for diagnostics
    pub fn no_migrate(mut self) -> Self {
        self.auto_migrate = false;
        self
    }

    fn is_memory(&self) -> bool {
        self.path.as_os_str() == MEMORY_PATH
    }
}

/// `<data dir>/lineage/lineage.db`, or `lineage.db` in the working directory
pub fn default_database_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("lineage").join("lineage.db"),
        None => PathBuf::from("lineage.db"),
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let connect_options = if config.is_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory: {:?}", parent)
                    })?;
                }
            }
            SqliteConnectOptions::new()
                .filename(&config.path)
                .create_if_missing(true)
        };

        // WAL keeps concurrent collection readers from blocking each other
        let connect_options = connect_options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(config.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("Failed to connect to database: {:?}", config.path))?;

        let db = Self {
            pool,
            path: config.path.clone(),
        };

        if config.auto_migrate {
            db.migrate().await?;
        }

        tracing::debug!(path = %config.path.display(), migrated = config.auto_migrate, "database ready");
        Ok(db)
    }

    pub async fn in_memory() -> Result<Self> {
        Self::new(DatabaseConfig::in_memory()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn migrate(&self) -> Result<()> {
        migrations::run_migrations(&self.pool)
            .await
            .context("Failed to run database migrations")
    }

    pub async fn migration_status(&self) -> Result<migrations::MigrationStatus> {
        migrations::migration_status(&self.pool)
            .await
            .context("Failed to check migration status")
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    /// Names from `tables` with no table in the archive, in input order
    pub async fn missing_tables<'a>(
        &self,
        tables: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<String>> {
        let present: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&self.pool)
                .await
                .context("Failed to list archive tables")?;

        Ok(tables
            .into_iter()
            .filter(|table| !present.iter().any(|(name,)| name.eq_ignore_ascii_case(table)))
            .map(str::to_string)
            .collect())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
