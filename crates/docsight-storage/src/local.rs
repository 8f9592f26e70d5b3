use crate::traits::{StorageError, StorageResult, StoredFile, UploadStorage};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem upload storage
#[derive(Clone, Debug)]
pub struct LocalUploadStorage {
    base_path: PathBuf,
}

impl LocalUploadStorage {
    /// Create the upload directory (if needed) and return a storage rooted at it.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalUploadStorage { base_path })
    }

    /// Map a client file name to a path inside the upload directory.
    ///
    /// Only the last path component is kept, so `../../etc/passwd.pdf` and
    /// `C:\cv\resume.pdf` land at `<dir>/passwd.pdf` and `<dir>/resume.pdf`.
    fn key_to_path(&self, filename: &str) -> StorageResult<PathBuf> {
        let last = filename
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or("")
            .trim();

        if last.is_empty() || last == "." || last == ".." {
            return Err(StorageError::InvalidKey(format!(
                "'{}' does not name a file",
                filename
            )));
        }

        if last.contains('\0') {
            return Err(StorageError::InvalidKey(
                "File name contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(last))
    }
}

#[async_trait]
impl UploadStorage for LocalUploadStorage {
    async fn save(&self, filename: &str, data: &[u8]) -> StorageResult<StoredFile> {
        let path = self.key_to_path(filename)?;
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let size_bytes = fs::metadata(&path).await?.len();

        tracing::info!(
            path = %path.display(),
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload saved to local storage"
        );

        Ok(StoredFile { path, size_bytes })
    }

    fn root(&self) -> &Path {
        &self.base_path
    }
}
