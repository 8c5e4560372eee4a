//! Response body DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use itqan_entity::user::User;

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for successful responses.
    pub success: bool,
    /// The response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Platform role.
    pub role: String,
    /// Profile image URL.
    pub profile_image: Option<String>,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            profile_image: user.profile_image,
            cover_image: user.cover_image,
            created_at: user.created_at,
        }
    }
}

/// Successful signup/login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT access token.
    pub token: String,
    /// Token expiration timestamp.
    pub expires_at: DateTime<Utc>,
    /// The authenticated account.
    pub user: UserResponse,
}

/// Generic message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome description.
    pub message: String,
}

/// Access derivation result for a (user, course) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessResponse {
    /// The course checked.
    pub course_id: Uuid,
    /// Whether the caller currently has access.
    pub has_access: bool,
}
