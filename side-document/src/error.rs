use thiserror::Error;

use crate::config::ConfigError;
use crate::resize::ResizeError;
use crate::storage::StorageError;

/// Errors originating from the `side-document` engine.
#[derive(Debug, Error)]
pub enum SideDocumentError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("resize error: {0}")]
    Resize(#[from] ResizeError),
}

pub type Result<T> = std::result::Result<T, SideDocumentError>;
