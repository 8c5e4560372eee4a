//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the background worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum concurrently executing jobs.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
    /// Queue poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Default maximum attempts for retryable jobs.
    #[serde(default = "default_max_attempts")]
    pub default_max_attempts: i32,
    /// Stored notifications retained per user.
    #[serde(default = "default_max_stored")]
    pub max_stored_notifications_per_user: u64,
    /// Days after which stored notifications are cleaned up.
    #[serde(default = "default_cleanup_days")]
    pub notification_cleanup_after_days: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            concurrency: default_concurrency(),
            poll_interval_seconds: default_poll_interval(),
            default_max_attempts: default_max_attempts(),
            max_stored_notifications_per_user: default_max_stored(),
            notification_cleanup_after_days: default_cleanup_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> u32 {
    4
}

fn default_poll_interval() -> u64 {
    5
}

fn default_max_attempts() -> i32 {
    3
}

fn default_max_stored() -> u64 {
    50
}

fn default_cleanup_days() -> u32 {
    30
}
