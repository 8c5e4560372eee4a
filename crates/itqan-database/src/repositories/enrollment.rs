//! Enrollment repository implementation.
//!
//! The enrollments table is the authoritative record of course access.
//! Writes from the approval workflow are deliberately idempotent: a
//! duplicate upsert is absorbed by `ON CONFLICT DO NOTHING` and a delete
//! of an already-removed row is not an error, so two admins racing on the
//! same request cannot crash either flow.

use sqlx::PgPool;
use uuid::Uuid;

use itqan_core::error::{AppError, ErrorKind};
use itqan_core::result::AppResult;
use itqan_entity::enrollment::model::Enrollment;

/// Repository for enrollment grant operations.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an enrollment if it does not already exist.
    ///
    /// Safe to call repeatedly for the same pair; the unique constraint
    /// conflict is swallowed and exactly one row remains.
    pub async fn upsert(&self, user_id: Uuid, course_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, course_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert enrollment", e)
        })?;
        Ok(())
    }

    /// Delete the enrollment for a (user, course) pair.
    ///
    /// Returns `true` if a row was removed; an already-missing row is
    /// reported as `false`, never as an error.
    pub async fn delete(&self, user_id: Uuid, course_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM enrollments WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete enrollment", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether an enrollment exists for a (user, course) pair.
    pub async fn exists(&self, user_id: Uuid, course_id: Uuid) -> AppResult<bool> {
        let found: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check enrollment", e)
        })?;
        Ok(found.is_some())
    }

    /// List all enrollments for a user, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list enrollments", e)
        })
    }

}
