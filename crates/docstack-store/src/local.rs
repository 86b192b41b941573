//! Local filesystem blob store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;

/// Filesystem implementation of [`BlobStore`].
///
/// Blobs are written under a root directory, mirroring the storage key as a
/// relative path (`<root>/documents/<id><ext>`). Keys are validated so they
/// can never resolve outside the root.
#[derive(Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create the store, making the root directory if necessary.
    pub async fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StoreError::BackendError(format!(
                "Failed to create storage directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(FsBlobStore { root })
    }

    /// Convert a storage key to a filesystem path, rejecting traversal
    /// sequences and absolute keys.
    fn key_to_path(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StoreError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.root.join(key))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, _content_type: &str, data: Vec<u8>) -> StoreResult<()> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StoreError::BackendError(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StoreError::BackendError(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StoreError::BackendError(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::debug!(key = %key, size_bytes = size, "Stored blob");

        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound(key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StoreError::BackendError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(data)
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound(key.to_string()));
        }

        fs::remove_file(&path).await.map_err(|e| {
            StoreError::BackendError(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::debug!(key = %key, "Deleted blob");

        Ok(())
    }
}
