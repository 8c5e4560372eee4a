//! Payment request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::PaymentStatus;

/// A student's submitted claim of payment for a course.
///
/// Multiple rows may exist for the same (user, course) pair; the
/// most-recently-created one governs the current display and derivation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentRequest {
    /// Unique payment request identifier.
    pub id: Uuid,
    /// The submitting student.
    pub user_id: Uuid,
    /// The course the payment is for.
    pub course_id: Uuid,
    /// Claimed amount.
    pub amount: f64,
    /// Public URL of the uploaded proof-of-payment image.
    pub receipt_url: String,
    /// Lifecycle status.
    pub status: PaymentStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a new payment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    /// The submitting student.
    pub user_id: Uuid,
    /// The target course.
    pub course_id: Uuid,
    /// Claimed amount.
    pub amount: f64,
    /// Public URL of the already-uploaded receipt.
    pub receipt_url: String,
}
