//! Notification severity level enumeration.

use serde::{Deserialize, Serialize};

/// Severity level of a notification entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// A positive outcome (approval, completed upload).
    Success,
    /// Neutral information.
    Info,
    /// Something the recipient should act on (revoked access).
    Warning,
    /// A failure the recipient should know about.
    Error,
}

impl NotificationLevel {
    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
