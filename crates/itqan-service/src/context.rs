//! Request context carrying the authenticated user identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use itqan_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by the API layer from the validated JWT and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The user's email (convenience field from JWT claims).
    pub email: String,
    /// The user's display name (convenience field from JWT claims).
    pub name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, email: String, name: String) -> Self {
        Self {
            user_id,
            role,
            email,
            name,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Errors unless the current user is an admin.
    pub fn require_admin(&self) -> Result<(), itqan_core::AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(itqan_core::AppError::authorization(
                "This action requires admin privileges",
            ))
        }
    }
}
