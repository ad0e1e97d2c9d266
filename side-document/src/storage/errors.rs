use thiserror::Error;

/// Errors emitted while reading or writing persisted drawer state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("state storage IO failed: {0}")]
    Io(#[from] std::io::Error),
    /// Blob serialization or deserialization failed.
    #[error("state storage JSON failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Host backend refused the operation (quota, private mode, ...).
    #[error("state storage unavailable: {0}")]
    Unavailable(String),
}
