//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
///
/// Two logical buckets exist: a public-read media bucket (course
/// thumbnails, profile and cover images) and a receipts bucket whose
/// object paths are namespaced per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Storage provider to use: `"local"` or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum payment receipt size in bytes (default 5 MB).
    #[serde(default = "default_max_receipt")]
    pub max_receipt_size_bytes: u64,
    /// Maximum media image size in bytes (default 10 MB).
    #[serde(default = "default_max_image")]
    pub max_image_size_bytes: u64,
    /// Path prefix for the public media bucket.
    #[serde(default = "default_media_prefix")]
    pub media_prefix: String,
    /// Path prefix for the per-user receipts bucket.
    #[serde(default = "default_receipts_prefix")]
    pub receipts_prefix: String,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for locally stored objects.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL under which locally stored objects are served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Public base URL for objects in the bucket.
    #[serde(default)]
    pub public_base_url: String,
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_max_receipt() -> u64 {
    5_242_880 // 5 MB
}

fn default_max_image() -> u64 {
    10_485_760 // 10 MB
}

fn default_media_prefix() -> String {
    "media".to_string()
}

fn default_receipts_prefix() -> String {
    "receipts".to_string()
}

fn default_local_root() -> String {
    "./data/storage/local".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/files".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
