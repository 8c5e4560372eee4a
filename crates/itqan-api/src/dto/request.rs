//! Request body and query DTOs.

use serde::Deserialize;
use validator::Validate;

use itqan_entity::course::CourseStatus;
use itqan_entity::user::UserRole;

/// POST /api/auth/signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password (hashed before storage).
    #[validate(length(min = 8))]
    pub password: String,
}

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1))]
    pub password: String,
    /// Which surface the user is logging into.
    pub role: UserRole,
}

/// PUT /api/users/me
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
}

/// POST /api/admin/courses
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    /// Course title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Video URL (optional at creation).
    pub video_url: Option<String>,
    /// Initial publication status (defaults to draft).
    pub status: Option<CourseStatus>,
}

/// PUT /api/admin/courses/{id}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    /// New title.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    /// New video URL.
    pub video_url: Option<String>,
    /// New publication status.
    pub status: Option<CourseStatus>,
}

/// Confirmation gate for destructive operations (cancel approval,
/// hard delete). The request is refused unless `confirm=true`.
#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    /// Explicit confirmation flag.
    #[serde(default)]
    pub confirm: bool,
}

/// Query selecting authoritative (fresh) reads over cached ones.
#[derive(Debug, Deserialize)]
pub struct FreshQuery {
    /// Bypass the cache and read the table directly.
    #[serde(default)]
    pub fresh: bool,
}
