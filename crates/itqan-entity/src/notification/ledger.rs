//! Ephemeral ledger entry — the client-cached notification tier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::level::NotificationLevel;

/// One entry in a capped, most-recent-first notification ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub level: NotificationLevel,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
    /// Whether the entry has been marked read.
    pub read: bool,
}

impl LedgerEntry {
    /// Create a fresh unread entry stamped with the current time.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            level,
            timestamp: Utc::now(),
            read: false,
        }
    }
}
