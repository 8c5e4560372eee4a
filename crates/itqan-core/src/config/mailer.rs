//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the transactional mail API client.
///
/// Delivery is best-effort: a disabled mailer or a failed send never
/// blocks or rolls back the workflow that requested it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    /// Whether outbound email is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// HTTP endpoint of the mail API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token for the mail API.
    #[serde(default)]
    pub api_key: String,
    /// From address for all outbound mail.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Dashboard URL linked from approval emails.
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_api_url(),
            api_key: String::new(),
            from_address: default_from_address(),
            dashboard_url: default_dashboard_url(),
            request_timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_from_address() -> String {
    "ITQAN Academy <onboarding@itqan.academy>".to_string()
}

fn default_dashboard_url() -> String {
    "https://itqan.academy/dashboard".to_string()
}

fn default_timeout() -> u64 {
    10
}
