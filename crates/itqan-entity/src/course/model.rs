//! Course entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::CourseStatus;

/// A piece of published learning content.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Unique course identifier.
    pub id: Uuid,
    /// Course title.
    pub title: String,
    /// Public URL of the course video (if uploaded).
    pub video_url: Option<String>,
    /// Public URL of the thumbnail image (if uploaded).
    pub thumbnail_url: Option<String>,
    /// Publication status.
    pub status: CourseStatus,
    /// When the course was created.
    pub created_at: DateTime<Utc>,
    /// When the course was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    /// Course title.
    pub title: String,
    /// Video URL (optional at creation).
    pub video_url: Option<String>,
    /// Thumbnail URL (optional at creation).
    pub thumbnail_url: Option<String>,
    /// Initial publication status.
    pub status: CourseStatus,
}

/// Data for updating an existing course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCourse {
    /// The course ID to update.
    pub id: Uuid,
    /// New title.
    pub title: Option<String>,
    /// New video URL.
    pub video_url: Option<String>,
    /// New thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// New publication status.
    pub status: Option<CourseStatus>,
}
