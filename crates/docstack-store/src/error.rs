//! Store operation errors

use docstack_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Store backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::DuplicateId(msg) => AppError::Conflict(msg),
            StoreError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StoreError::BackendError(msg) => AppError::Store(msg),
            StoreError::IoError(err) => AppError::BlobStorage(err.to_string()),
        }
    }
}
