/// Error types for the Quill domain core
use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Flatten a `Validation` error into (field, message) pairs.
    ///
    /// Fields with a rule violation but no explicit message fall back to the
    /// rule code, so callers always get something renderable.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let AppError::Validation(errors) = self {
            for (field, errs) in errors.field_errors() {
                for e in errs {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    fields.push((field.to_string(), message));
                }
            }
        }
        fields
    }
}
