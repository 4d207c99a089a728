use gscp_store::StoreError;
use thiserror::Error;

/// Copy operation errors
#[derive(Debug, Error)]
pub enum CopyError {
    /// The location reference matches no known form: neither a local path,
    /// a `gs://` URI, nor a pre-built remote handle.
    #[error("Failed to determine scheme for {0:?}")]
    Classification(String),

    #[error("Source not found: {0}")]
    NotFound(String),

    /// `copy_files` was given paired destinations of the wrong length.
    /// Raised before any file is touched.
    #[error("Destination count ({dsts}) does not match source count ({srcs})")]
    LengthMismatch { srcs: usize, dsts: usize },

    #[error("Transfer failed: {0}")]
    Transfer(#[source] StoreError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for copy operations
pub type CopyResult<T> = Result<T, CopyError>;

impl From<StoreError> for CopyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(uri) => CopyError::NotFound(uri),
            StoreError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                CopyError::NotFound(e.to_string())
            }
            other => CopyError::Transfer(other),
        }
    }
}
