//! Approval email delivery via a Resend-compatible HTTP mail API.
//!
//! Delivery is always best-effort from the workflow's point of view: the
//! approval transaction has already committed by the time a send is
//! attempted, and the worker retries transient failures with a bounded
//! budget.

use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tracing::info;

use itqan_core::config::mailer::MailerConfig;

/// How a delivery attempt failed, for retry classification.
#[derive(Debug, Error)]
pub enum MailDeliveryError {
    /// Worth retrying: network failure or a 5xx from the mail API.
    #[error("transient mail delivery failure: {0}")]
    Transient(String),
    /// Not worth retrying: the mail API rejected the request (4xx).
    #[error("permanent mail delivery failure: {0}")]
    Permanent(String),
}

/// Client for the transactional mail API.
#[derive(Debug, Clone)]
pub struct ApprovalMailer {
    /// Mailer configuration.
    config: MailerConfig,
    /// Shared HTTP client.
    client: reqwest::Client,
}

impl ApprovalMailer {
    /// Creates a new mailer from configuration.
    pub fn new(config: MailerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Whether outbound email is enabled at all.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Sends the "payment approved, course unlocked" email to a student.
    pub async fn send_approval_email(
        &self,
        student_email: &str,
        course_name: &str,
    ) -> Result<(), MailDeliveryError> {
        if !self.config.enabled {
            info!(to = %student_email, "Mailer disabled; skipping approval email");
            return Ok(());
        }

        let body = json!({
            "from": self.config.from_address,
            "to": [student_email],
            "subject": "Payment Approved - Course Unlocked!",
            "html": approval_email_html(course_name, &self.config.dashboard_url),
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailDeliveryError::Transient(format!("mail API unreachable: {e}")))?;

        let status = response.status();
        if status.is_success() {
            info!(to = %student_email, course = %course_name, "Approval email sent");
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            Err(MailDeliveryError::Permanent(format!(
                "mail API rejected request ({status}): {detail}"
            )))
        } else {
            Err(MailDeliveryError::Transient(format!(
                "mail API error ({status}): {detail}"
            )))
        }
    }
}

/// Renders the approval email body.
fn approval_email_html(course_name: &str, dashboard_url: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h1 style="text-align: center;">Congratulations!</h1>
  <p>Your payment for <strong>"{course_name}"</strong> has been verified and approved.</p>
  <p>You can now access your course from your student dashboard.</p>
  <div style="text-align: center; margin-top: 30px;">
    <a href="{dashboard_url}">Go to Dashboard</a>
  </div>
  <p style="font-size: 12px; text-align: center;">ITQAN Academy - Empowering your future through knowledge.</p>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_mailer_is_a_noop() {
        let mailer = ApprovalMailer::new(MailerConfig::default());
        assert!(!mailer.is_enabled());

        let result = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(mailer.send_approval_email("a@b.c", "FullStack Mastery"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_email_body_names_the_course() {
        let html = approval_email_html("UI/UX Principles", "https://itqan.academy/dashboard");
        assert!(html.contains("UI/UX Principles"));
        assert!(html.contains("https://itqan.academy/dashboard"));
    }
}
