//! Enrollment-related domain events.
//!
//! These are the two event kinds carried on the `enrollment-updates`
//! hint channel. Delivery is best-effort and at-most-once per subscriber
//! session; the enrollments table remains the source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to enrollment grants and revocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EnrollmentEvent {
    /// A payment request was approved and access granted.
    EnrollmentApproved {
        /// The affected student.
        user_id: Uuid,
        /// The unlocked course.
        course_id: Uuid,
        /// Course title (for human-readable notifications).
        course_name: String,
        /// When the approval happened.
        timestamp: DateTime<Utc>,
    },
    /// An approval was cancelled and access revoked.
    EnrollmentCancelled {
        /// The affected student.
        user_id: Uuid,
        /// The locked course.
        course_id: Uuid,
        /// Course title (for human-readable notifications).
        course_name: String,
        /// When the cancellation happened.
        timestamp: DateTime<Utc>,
    },
}

impl EnrollmentEvent {
    /// Returns the student this event is addressed to.
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::EnrollmentApproved { user_id, .. } => *user_id,
            Self::EnrollmentCancelled { user_id, .. } => *user_id,
        }
    }

    /// Returns the affected course.
    pub fn course_id(&self) -> Uuid {
        match self {
            Self::EnrollmentApproved { course_id, .. } => *course_id,
            Self::EnrollmentCancelled { course_id, .. } => *course_id,
        }
    }

    /// Returns the course title carried in the payload.
    pub fn course_name(&self) -> &str {
        match self {
            Self::EnrollmentApproved { course_name, .. } => course_name,
            Self::EnrollmentCancelled { course_name, .. } => course_name,
        }
    }

    /// Returns when the underlying mutation happened.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::EnrollmentApproved { timestamp, .. } => *timestamp,
            Self::EnrollmentCancelled { timestamp, .. } => *timestamp,
        }
    }

    /// Whether this event revokes access (as opposed to granting it).
    pub fn is_revocation(&self) -> bool {
        matches!(self, Self::EnrollmentCancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tag_names() {
        let event = EnrollmentEvent::EnrollmentApproved {
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            course_name: "Advanced React Patterns".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "enrollment-approved");

        let event = EnrollmentEvent::EnrollmentCancelled {
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            course_name: "UI/UX Principles".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "enrollment-cancelled");
    }

    #[test]
    fn test_revocation_flag() {
        let event = EnrollmentEvent::EnrollmentCancelled {
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            course_name: "Database Architecture".to_string(),
            timestamp: Utc::now(),
        };
        assert!(event.is_revocation());
    }
}
