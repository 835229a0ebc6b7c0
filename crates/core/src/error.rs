/// Domain-level failures raised before or by the persistence layer.
///
/// Every variant carries a message that can be shown to the user as is.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A mandatory field (identifier or name) was empty after trimming.
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// A field could not be parsed into its typed form.
    #[error("Invalid input for {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// Another record already uses this identifier.
    #[error("A set with identifier {0} already exists")]
    DuplicateKey(String),

    /// No record exists with this identifier.
    #[error("Set not found: {0}")]
    NotFound(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidInput`].
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}
