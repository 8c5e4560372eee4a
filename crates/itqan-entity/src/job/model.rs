//! Background job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{JobPriority, JobStatus};

/// A persisted background job.
///
/// Jobs carry the fire-and-forget side effects of the payment workflow
/// (approval emails, notification retention) so that failures are
/// retried with a bounded budget instead of being silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    /// Unique job identifier.
    pub id: Uuid,
    /// Handler type (e.g., "approval_email", "notification_trim").
    pub job_type: String,
    /// Queue name (e.g., "default", "mail", "maintenance").
    pub queue: String,
    /// Scheduling priority.
    pub priority: JobPriority,
    /// Job payload as JSON.
    pub payload: serde_json::Value,
    /// Result payload (if completed).
    pub result: Option<serde_json::Value>,
    /// Error message (if failed).
    pub error_message: Option<String>,
    /// Lifecycle status.
    pub status: JobStatus,
    /// Attempts made so far.
    pub attempts: i32,
    /// Maximum retry attempts.
    pub max_attempts: i32,
    /// Do not run before this time (if scheduled).
    pub scheduled_at: Option<DateTime<Utc>>,
    /// When the current attempt started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the job finished.
    pub completed_at: Option<DateTime<Utc>>,
    /// Identifier of the worker that claimed the job.
    pub worker_id: Option<String>,
    /// When the job was enqueued.
    pub created_at: DateTime<Utc>,
    /// When the job was last updated.
    pub updated_at: DateTime<Utc>,
}
