//! Object store trait for pluggable upload backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for object storage backends holding uploaded media.
///
/// Implementations exist for the local filesystem and S3. Uploads are a
/// single request/response with no resumability; a failed upload is
/// retried wholesale by the caller. `public_url` must return a durable
/// URL for an object previously written with [`ObjectStore::put`].
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write an object at the given path.
    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Read an object into memory as a complete byte vector.
    async fn get(&self, path: &str) -> AppResult<Bytes>;

    /// Delete an object at the given path.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether an object exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Return the durable public URL for a stored object.
    fn public_url(&self, path: &str) -> String;
}
