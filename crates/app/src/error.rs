use brickshelf_core::error::CoreError;
use brickshelf_db::StoreError;

/// Application-level error type for catalog operations.
///
/// Wraps [`CoreError`] for domain errors and adds a storage variant.
/// [`AppError::classify`] turns either into a title and message for the
/// user; neither terminates the shell.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `brickshelf_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for catalog operation results.
pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(key) => AppError::Core(CoreError::DuplicateKey(key)),
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl AppError {
    /// Classify into a dialog title and a user-facing message.
    ///
    /// Storage failures are logged here, at the boundary where they are
    /// shown to the user.
    pub fn classify(&self) -> (&'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::MissingRequiredField(_) => ("Missing information", core.to_string()),
                CoreError::InvalidInput { .. } => ("Invalid input", core.to_string()),
                CoreError::DuplicateKey(_) => ("Duplicate identifier", core.to_string()),
                CoreError::NotFound(_) => ("Not found", core.to_string()),
            },
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                ("Database error", format!("The catalog could not be accessed: {err}"))
            }
        }
    }
}
