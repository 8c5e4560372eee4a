//! Enrollment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A grant of access linking one user to one course.
///
/// At most one enrollment exists per (user, course) pair; the row's
/// existence is the sole authority for course access, apart from the
/// admin-role and super-admin bypasses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    /// The enrolled student.
    pub user_id: Uuid,
    /// The accessible course.
    pub course_id: Uuid,
    /// When access was granted.
    pub created_at: DateTime<Utc>,
}
