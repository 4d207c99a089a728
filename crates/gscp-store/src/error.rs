use thiserror::Error;

/// Remote store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Copy failed: {0}")]
    CopyFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Invalid remote URI: {0}")]
    InvalidUri(String),

    #[error("Store backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
