use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{KvRepository, Storage, TaskRepository};

mod kv_repo;
mod mapping;
mod migrate;
mod task_repo;

/// Database used when neither `DESK_DB_URL` nor `DB_PATH` is set.
pub const DEFAULT_DB_URL: &str = "sqlite:desk.sqlite?mode=rwc";

/// `SQLite` URL that opens (or creates) the database file at `path`.
#[must_use]
pub fn sqlite_url_for_path(path: &str) -> String {
    if path.starts_with("sqlite:") {
        return path.to_owned();
    }
    format!("sqlite:{path}?mode=rwc")
}

/// Resolve the database URL: `DESK_DB_URL`, then `DB_PATH`, then the default.
#[must_use]
pub fn database_url_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> String {
    if let Some(url) = lookup("DESK_DB_URL").filter(|v| !v.trim().is_empty()) {
        return url;
    }
    match lookup("DB_PATH").filter(|v| !v.trim().is_empty()) {
        Some(path) => sqlite_url_for_path(&path),
        None => DEFAULT_DB_URL.to_owned(),
    }
}

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the connection cannot be established or if
    /// the connection pragmas fail during setup.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA journal_mode = WAL;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        tracing::debug!(database_url, "sqlite pool connected");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Build a `Storage` backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        let tasks: Arc<dyn TaskRepository> = Arc::new(repo.clone());
        let kv: Arc<dyn KvRepository> = Arc::new(repo);
        Ok(Self { tasks, kv })
    }
}
