//! Payment request repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use itqan_core::error::{AppError, ErrorKind};
use itqan_core::result::AppResult;
use itqan_core::types::pagination::{PageRequest, PageResponse};
use itqan_entity::payment::model::{CreatePaymentRequest, PaymentRequest};
use itqan_entity::payment::status::PaymentStatus;

/// Repository for payment request CRUD operations.
#[derive(Debug, Clone)]
pub struct PaymentRequestRepository {
    pool: PgPool,
}

impl PaymentRequestRepository {
    /// Create a new payment request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a payment request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PaymentRequest>> {
        sqlx::query_as::<_, PaymentRequest>("SELECT * FROM payment_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find payment request", e)
            })
    }

    /// List all payment requests with pagination, newest first (admin view).
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<PaymentRequest>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payment_requests")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count payment requests", e)
            })?;

        let requests = sqlx::query_as::<_, PaymentRequest>(
            "SELECT * FROM payment_requests ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list payment requests", e)
        })?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a student's own payment requests, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<PaymentRequest>> {
        sqlx::query_as::<_, PaymentRequest>(
            "SELECT * FROM payment_requests WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user payment requests", e)
        })
    }

    /// Resolve the current request for a (user, course) pair.
    ///
    /// Duplicate rows per pair are permitted by design; the
    /// most-recently-created row governs current status display.
    pub async fn find_current_for_pair(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<Option<PaymentRequest>> {
        sqlx::query_as::<_, PaymentRequest>(
            "SELECT * FROM payment_requests WHERE user_id = $1 AND course_id = $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve current request", e)
        })
    }

    /// Insert a new pending payment request.
    pub async fn create(&self, data: &CreatePaymentRequest) -> AppResult<PaymentRequest> {
        sqlx::query_as::<_, PaymentRequest>(
            "INSERT INTO payment_requests (user_id, course_id, amount, receipt_url, status) \
             VALUES ($1, $2, $3, $4, 'pending') RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.course_id)
        .bind(data.amount)
        .bind(&data.receipt_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create payment request", e)
        })
    }

    /// Set a payment request's status and return the updated row.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<PaymentRequest> {
        sqlx::query_as::<_, PaymentRequest>(
            "UPDATE payment_requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update payment status", e)
        })?
        .ok_or_else(|| AppError::not_found("Payment request not found"))
    }

    /// Delete a payment request by ID. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM payment_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete payment request", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
