//! Approval email delivery job.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use itqan_entity::job::model::Job;
use itqan_service::email::mailer::{ApprovalMailer, MailDeliveryError};

use crate::executor::{JobExecutionError, JobHandler};

/// Payload for an approval email job.
#[derive(Debug, Deserialize)]
struct ApprovalEmailPayload {
    /// Recipient student email.
    student_email: String,
    /// Course title named in the email.
    course_name: String,
}

/// Sends the "payment approved" email to a student.
///
/// Network and 5xx failures are transient and retried by the runner up
/// to the job's attempt budget; a 4xx rejection from the mail API is
/// permanent. Either way the approval that enqueued this job has long
/// since committed.
#[derive(Debug)]
pub struct ApprovalEmailHandler {
    /// Mail API client.
    mailer: ApprovalMailer,
}

impl ApprovalEmailHandler {
    /// Create a new approval email handler.
    pub fn new(mailer: ApprovalMailer) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl JobHandler for ApprovalEmailHandler {
    fn job_type(&self) -> &str {
        "approval_email"
    }

    async fn execute(&self, job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let payload: ApprovalEmailPayload =
            serde_json::from_value(job.payload.clone()).map_err(|e| {
                JobExecutionError::Permanent(format!("Malformed approval email payload: {e}"))
            })?;

        self.mailer
            .send_approval_email(&payload.student_email, &payload.course_name)
            .await
            .map_err(|e| match e {
                MailDeliveryError::Transient(msg) => JobExecutionError::Transient(msg),
                MailDeliveryError::Permanent(msg) => JobExecutionError::Permanent(msg),
            })?;

        info!(
            job_id = %job.id,
            to = %payload.student_email,
            "Approval email delivered"
        );

        Ok(Some(serde_json::json!({
            "task": "approval_email",
            "to": payload.student_email,
        })))
    }
}
