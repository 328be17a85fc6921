use thiserror::Error;

/// Unified error type used across the ledger store.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage engine failure (I/O, constraint, corruption).
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Rejected input at the store boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation targeted an id that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage location could not be prepared.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Filesystem error outside the storage engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Message suitable for direct display to the user.
    ///
    /// Validation and not-found messages are already user-facing; the
    /// rest collapse to a generic line, with details kept for logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Configuration(_) => "A configuration error occurred".to_string(),
            AppError::Io(_) => "A file operation failed".to_string(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{} not found", resource.into()))
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
