//! Course repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use itqan_core::error::{AppError, ErrorKind};
use itqan_core::result::AppResult;
use itqan_entity::course::model::{Course, CreateCourse, UpdateCourse};

/// Repository for course CRUD operations.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Create a new course repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find course", e))
    }

    /// List all courses, newest first (admin view).
    pub async fn find_all(&self) -> AppResult<Vec<Course>> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list courses", e))
    }

    /// List published courses, newest first (student view).
    pub async fn find_published(&self) -> AppResult<Vec<Course>> {
        sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE status = 'published' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list published courses", e)
        })
    }

    /// Create a new course.
    pub async fn create(&self, data: &CreateCourse) -> AppResult<Course> {
        sqlx::query_as::<_, Course>(
            "INSERT INTO courses (title, video_url, thumbnail_url, status) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.video_url)
        .bind(&data.thumbnail_url)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create course", e))
    }

    /// Update an existing course. Unset fields are left untouched.
    pub async fn update(&self, data: &UpdateCourse) -> AppResult<Course> {
        sqlx::query_as::<_, Course>(
            "UPDATE courses SET \
                title = COALESCE($2, title), \
                video_url = COALESCE($3, video_url), \
                thumbnail_url = COALESCE($4, thumbnail_url), \
                status = COALESCE($5, status), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.title)
        .bind(&data.video_url)
        .bind(&data.thumbnail_url)
        .bind(data.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update course", e))?
        .ok_or_else(|| AppError::not_found("Course not found"))
    }

    /// Delete a course by ID. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete course", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
