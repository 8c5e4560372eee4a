//! S3-compatible object store.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use itqan_core::config::storage::S3StorageConfig;
use itqan_core::error::{AppError, ErrorKind};
use itqan_core::result::AppResult;
use itqan_core::traits::storage::ObjectStore;

/// S3-compatible object store (AWS S3, MinIO, and friends).
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    /// The AWS SDK client.
    client: aws_sdk_s3::Client,
    /// Target bucket name.
    bucket: String,
    /// Public base URL for stored objects.
    public_base_url: String,
}

impl S3ObjectStore {
    /// Create a new S3 object store from configuration.
    ///
    /// Credentials are resolved through the standard AWS provider chain
    /// (environment, shared config, instance metadata).
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        info!(
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 object store"
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(&config.endpoint);
        }
        let sdk_config = loader.load().await;
        let client = aws_sdk_s3::Client::new(&sdk_config);

        let public_base_url = if config.public_base_url.is_empty() {
            format!(
                "https://{}.s3.{}.amazonaws.com",
                config.bucket, config.region
            )
        } else {
            config.public_base_url.trim_end_matches('/').to_string()
        };

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url,
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("S3 bucket '{}' unreachable", self.bucket),
                    e,
                )
            })
    }

    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to upload object: {path}"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn get(&self, path: &str) -> AppResult<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to fetch object: {path}"),
                    e,
                )
            })?;

        let data = output.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read object body: {path}"),
                e,
            )
        })?;
        Ok(data.into_bytes())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object: {path}"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to check object: {path}"),
                        err,
                    ))
                }
            }
        }
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path.trim_start_matches('/'))
    }
}
