//! Storage manager — routes uploads into the two logical buckets.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use itqan_core::config::storage::StorageConfig;
use itqan_core::error::AppError;
use itqan_core::result::AppResult;
use itqan_core::traits::storage::ObjectStore;

/// Central storage manager for ITQAN uploads.
///
/// Wraps a single configured provider and enforces the path layout of
/// the two logical buckets: the public media bucket and the per-user
/// receipts bucket.
#[derive(Debug, Clone)]
pub struct StorageManager {
    /// The configured object store provider.
    store: Arc<dyn ObjectStore>,
    /// Path prefix for the media bucket.
    media_prefix: String,
    /// Path prefix for the receipts bucket.
    receipts_prefix: String,
}

impl StorageManager {
    /// Create a storage manager with the provider selected by configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let store: Arc<dyn ObjectStore> = match config.provider.as_str() {
            "local" => Arc::new(crate::providers::LocalObjectStore::new(&config.local).await?),
            "s3" => Arc::new(crate::providers::S3ObjectStore::new(&config.s3).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: local, s3"
                )));
            }
        };

        Ok(Self {
            store,
            media_prefix: config.media_prefix.trim_matches('/').to_string(),
            receipts_prefix: config.receipts_prefix.trim_matches('/').to_string(),
        })
    }

    /// Create a storage manager from an existing provider (for testing).
    pub fn from_store(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            media_prefix: "media".to_string(),
            receipts_prefix: "receipts".to_string(),
        }
    }

    /// Get a reference to the underlying provider.
    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Build the receipt object path for a submission.
    ///
    /// Namespaced by user id, course id, and submission time so that
    /// repeated submissions never collide.
    pub fn receipt_path(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        submitted_at: DateTime<Utc>,
        extension: &str,
    ) -> String {
        format!(
            "{}/{}/{}/{}.{}",
            self.receipts_prefix,
            user_id,
            course_id,
            submitted_at.timestamp_millis(),
            extension
        )
    }

    /// Build a media object path (thumbnails, avatars, covers).
    pub fn media_path(&self, category: &str, owner_id: Uuid, extension: &str) -> String {
        format!(
            "{}/{}/{}-{}.{}",
            self.media_prefix,
            category,
            owner_id,
            Utc::now().timestamp_millis(),
            extension
        )
    }

    /// Upload a payment receipt and return its durable public URL.
    pub async fn put_receipt(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        submitted_at: DateTime<Utc>,
        extension: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<String> {
        let path = self.receipt_path(user_id, course_id, submitted_at, extension);
        self.store.put(&path, data, content_type).await?;
        Ok(self.store.public_url(&path))
    }

    /// Upload a media object and return its durable public URL.
    pub async fn put_media(
        &self,
        category: &str,
        owner_id: Uuid,
        extension: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<String> {
        let path = self.media_path(category, owner_id, extension);
        self.store.put(&path, data, content_type).await?;
        Ok(self.store.public_url(&path))
    }

    /// Check provider health.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itqan_core::config::storage::LocalStorageConfig;

    async fn make_manager() -> (tempfile::TempDir, StorageManager) {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = LocalStorageConfig {
            root_path: dir.path().to_string_lossy().to_string(),
            public_base_url: "http://localhost:8080/files".to_string(),
        };
        let store = crate::providers::LocalObjectStore::new(&config)
            .await
            .expect("store");
        (dir, StorageManager::from_store(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_receipt_path_is_namespaced() {
        let (_dir, manager) = make_manager().await;
        let user = Uuid::new_v4();
        let course = Uuid::new_v4();
        let now = Utc::now();

        let path = manager.receipt_path(user, course, now, "png");
        assert!(path.starts_with(&format!("receipts/{user}/{course}/")));
        assert!(path.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_put_receipt_returns_public_url() {
        let (_dir, manager) = make_manager().await;
        let url = manager
            .put_receipt(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Utc::now(),
                "png",
                "image/png",
                Bytes::from_static(b"img"),
            )
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:8080/files/receipts/"));
    }

    #[tokio::test]
    async fn test_repeated_submissions_do_not_collide() {
        let (_dir, manager) = make_manager().await;
        let user = Uuid::new_v4();
        let course = Uuid::new_v4();
        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::milliseconds(5);

        assert_ne!(
            manager.receipt_path(user, course, t1, "png"),
            manager.receipt_path(user, course, t2, "png")
        );
    }
}
