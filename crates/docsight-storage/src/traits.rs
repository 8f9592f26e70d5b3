//! Storage abstraction trait

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A file written to upload storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[async_trait]
pub trait UploadStorage: Send + Sync {
    /// Write `data` under the given client file name, replacing any existing file.
    async fn save(&self, filename: &str, data: &[u8]) -> StorageResult<StoredFile>;

    /// Root directory of this storage.
    fn root(&self) -> &std::path::Path;
}
