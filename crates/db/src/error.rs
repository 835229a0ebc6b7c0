//! Errors raised by repository writes.

/// Failure of a persistence operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another record already uses this identifier. Nothing was written.
    #[error("A set with identifier {0} already exists")]
    DuplicateKey(String),

    /// The database could not be opened, read or written.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify a failed write against `key`.
    ///
    /// SQLite reports primary-key collisions as unique violations; those map
    /// to [`StoreError::DuplicateKey`], everything else to `Database`.
    pub fn from_write(err: sqlx::Error, key: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateKey(key.to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}
