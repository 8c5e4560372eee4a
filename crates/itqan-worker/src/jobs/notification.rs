//! Durable notification retention job.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::info;

use itqan_database::repositories::notification::NotificationRepository;
use itqan_entity::job::model::Job;

use crate::executor::{JobExecutionError, JobHandler};

/// Trims the durable notification table: per-user cap plus an age horizon.
#[derive(Debug)]
pub struct NotificationTrimHandler {
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
    /// Max age in days before cleanup.
    cleanup_after_days: i64,
    /// Max stored notifications per user.
    max_stored_per_user: i64,
}

impl NotificationTrimHandler {
    /// Create a new notification retention handler.
    pub fn new(
        notification_repo: Arc<NotificationRepository>,
        cleanup_after_days: i64,
        max_stored_per_user: i64,
    ) -> Self {
        Self {
            notification_repo,
            cleanup_after_days,
            max_stored_per_user,
        }
    }
}

#[async_trait]
impl JobHandler for NotificationTrimHandler {
    fn job_type(&self) -> &str {
        "notification_trim"
    }

    async fn execute(&self, job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let cutoff = Utc::now() - Duration::days(self.cleanup_after_days);

        let expired_removed = self
            .notification_repo
            .cleanup_old(cutoff)
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Notification cleanup failed: {e}"))
            })?;

        let overflow_removed = self
            .notification_repo
            .trim_per_user(self.max_stored_per_user)
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Notification per-user trim failed: {e}"))
            })?;

        info!(
            job_id = %job.id,
            expired_removed,
            overflow_removed,
            "Notification retention pass complete"
        );

        Ok(Some(serde_json::json!({
            "task": "notification_trim",
            "expired_removed": expired_removed,
            "overflow_removed": overflow_removed,
            "cutoff_days": self.cleanup_after_days,
            "max_per_user": self.max_stored_per_user,
        })))
    }
}
