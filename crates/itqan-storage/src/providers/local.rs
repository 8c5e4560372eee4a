//! Local filesystem object store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use itqan_core::config::storage::LocalStorageConfig;
use itqan_core::error::{AppError, ErrorKind};
use itqan_core::result::AppResult;
use itqan_core::traits::storage::ObjectStore;

/// Local filesystem object store.
///
/// Objects live under a root directory and are served publicly under the
/// configured base URL by the HTTP layer.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    /// Root directory for all stored objects.
    root: PathBuf,
    /// Base URL under which objects are publicly reachable.
    public_base_url: String,
}

impl LocalObjectStore {
    /// Create a new local object store rooted at the configured path.
    pub async fn new(config: &LocalStorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a relative path to an absolute path within the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let clean = path.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn put(&self, path: &str, data: Bytes, _content_type: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        self.ensure_parent(&full_path).await?;
        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write object: {path}"),
                e,
            )
        })?;
        Ok(())
    }

    async fn get(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path);
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read object: {path}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete object: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.resolve(path).exists())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn make_store() -> (tempfile::TempDir, LocalObjectStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = LocalStorageConfig {
            root_path: dir.path().to_string_lossy().to_string(),
            public_base_url: "http://localhost:8080/files".to_string(),
        };
        let store = LocalObjectStore::new(&config).await.expect("store");
        (dir, store)
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let (_dir, store) = make_store().await;
        let data = Bytes::from_static(b"receipt bytes");

        store
            .put("receipts/u/c/1.png", data.clone(), "image/png")
            .await
            .unwrap();
        assert!(store.exists("receipts/u/c/1.png").await.unwrap());
        assert_eq!(store.get("receipts/u/c/1.png").await.unwrap(), data);

        store.delete("receipts/u/c/1.png").await.unwrap();
        assert!(!store.exists("receipts/u/c/1.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let (_dir, store) = make_store().await;
        store.delete("never/was/here.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_public_url() {
        let (_dir, store) = make_store().await;
        assert_eq!(
            store.public_url("/media/thumb.png"),
            "http://localhost:8080/files/media/thumb.png"
        );
    }
}
