//! SQLite persistence for the set catalog.
//!
//! [`Store`] points at the database file. Every repository call opens its
//! own connection through [`Store::connect`] and drops it before returning,
//! on success and error paths alike.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::Connection;

pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;

pub use error::StoreError;

/// Location and connection settings of the catalog database.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Store {
    /// Point at a database file. The file is created on first connect.
    ///
    /// Rollback-journal mode is kept so existing stores are not switched to WAL.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection. It is closed when dropped.
    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        SqliteConnection::connect_with(&self.options).await
    }

    /// Verify the file can be opened and queried.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&mut conn)
            .await?;
        Ok(())
    }
}
