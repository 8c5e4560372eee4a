//! The payment approval workflow.
//!
//! State machine: `pending → approved | rejected`; `approved → pending`
//! via explicit cancellation; any state → deleted via hard delete.
//!
//! Each multi-step operation treats its first durable mutation as the
//! commit point. Failures before that point abort cleanly with no side
//! effects; failures after it are logged and absorbed — the hint
//! broadcast, the approval email, and the ledger appends are best-effort
//! by contract and never roll back the mutation that preceded them.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use itqan_core::error::AppError;
use itqan_core::events::EnrollmentEvent;
use itqan_core::result::AppResult;
use itqan_core::traits::hints::HintSink;
use itqan_core::types::pagination::{PageRequest, PageResponse};
use itqan_database::repositories::course::CourseRepository;
use itqan_database::repositories::enrollment::EnrollmentRepository;
use itqan_database::repositories::job::JobRepository;
use itqan_database::repositories::payment::PaymentRequestRepository;
use itqan_database::repositories::user::UserRepository;
use itqan_entity::course::Course;
use itqan_entity::job::{Job, JobPriority, JobStatus};
use itqan_entity::notification::NotificationLevel;
use itqan_entity::payment::model::{CreatePaymentRequest, PaymentRequest};
use itqan_entity::payment::status::PaymentStatus;
use itqan_entity::user::User;
use itqan_storage::manager::StorageManager;

use crate::context::RequestContext;
use crate::enrollment::service::EnrollmentService;
use crate::notification::service::NotificationService;

use super::submit::{SubmitPaymentParams, validate_receipt};

/// Queue and retry budget for approval email jobs.
const MAIL_QUEUE: &str = "mail";
const MAIL_MAX_ATTEMPTS: i32 = 3;

/// Job type handled by the worker's approval email handler.
pub const APPROVAL_EMAIL_JOB: &str = "approval_email";

/// Orchestrates the payment request lifecycle and its enrollment side
/// effects.
#[derive(Clone)]
pub struct PaymentService {
    /// Payment request repository.
    payment_repo: Arc<PaymentRequestRepository>,
    /// Enrollment repository.
    enrollment_repo: Arc<EnrollmentRepository>,
    /// Course repository.
    course_repo: Arc<CourseRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Job repository (approval email enqueue).
    job_repo: Arc<JobRepository>,
    /// Receipt storage.
    storage: Arc<StorageManager>,
    /// Notification fan-out (both tiers).
    notifications: NotificationService,
    /// Enrollment cache invalidation.
    enrollments: EnrollmentService,
    /// Best-effort hint publisher.
    hints: Arc<dyn HintSink>,
    /// Receipt size ceiling in bytes.
    max_receipt_size_bytes: u64,
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService").finish()
    }
}

impl PaymentService {
    /// Creates a new payment service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        payment_repo: Arc<PaymentRequestRepository>,
        enrollment_repo: Arc<EnrollmentRepository>,
        course_repo: Arc<CourseRepository>,
        user_repo: Arc<UserRepository>,
        job_repo: Arc<JobRepository>,
        storage: Arc<StorageManager>,
        notifications: NotificationService,
        enrollments: EnrollmentService,
        hints: Arc<dyn HintSink>,
        max_receipt_size_bytes: u64,
    ) -> Self {
        Self {
            payment_repo,
            enrollment_repo,
            course_repo,
            user_repo,
            job_repo,
            storage,
            notifications,
            enrollments,
            hints,
            max_receipt_size_bytes,
        }
    }

    /// Submits a new payment claim for a course.
    ///
    /// Validation runs before any I/O; the receipt upload must succeed
    /// before the database row is inserted so no row ever points at a
    /// failed upload. If the insert fails after a successful upload the
    /// orphaned stored object is not cleaned up (accepted leak).
    /// Duplicate submissions for the same (user, course) are permitted.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        params: SubmitPaymentParams,
    ) -> AppResult<PaymentRequest> {
        let extension = validate_receipt(&params, self.max_receipt_size_bytes)?;

        let course = self.require_course(params.course_id).await?;

        let submitted_at = Utc::now();
        let receipt_url = self
            .storage
            .put_receipt(
                ctx.user_id,
                params.course_id,
                submitted_at,
                extension,
                &params.content_type,
                params.receipt.clone(),
            )
            .await?;

        let request = self
            .payment_repo
            .create(&CreatePaymentRequest {
                user_id: ctx.user_id,
                course_id: params.course_id,
                amount: params.amount,
                receipt_url,
            })
            .await?;

        info!(
            request_id = %request.id,
            user_id = %ctx.user_id,
            course_id = %params.course_id,
            amount = params.amount,
            "Payment request submitted"
        );

        let message = format!(
            "{} submitted a payment claim for \"{}\"",
            ctx.name, course.title
        );
        if let Err(e) = self.notifications.notify_admins(&message).await {
            warn!(request_id = %request.id, error = %e, "Failed to notify admins of submission");
        }

        Ok(request)
    }

    /// Approves a payment request and grants enrollment.
    ///
    /// Effects, in order: set status `approved`; upsert the enrollment
    /// row; publish the `enrollment-approved` hint; enqueue the approval
    /// email; append the student and admin notifications. The first two
    /// steps abort and surface on failure; everything after the
    /// enrollment upsert is best-effort.
    ///
    /// Concurrent double-approval is tolerated: re-approving an already
    /// approved request repeats the idempotent steps and leaves exactly
    /// one enrollment row.
    pub async fn approve(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<PaymentRequest> {
        ctx.require_admin()?;

        let request = self.require_request(request_id).await?;
        if request.status == PaymentStatus::Rejected {
            return Err(AppError::validation(
                "A rejected payment request cannot be approved",
            ));
        }

        // Read-only lookups happen before the commit point so a missing
        // course or student aborts with no side effects.
        let course = self.require_course(request.course_id).await?;
        let student = self.require_user(request.user_id).await?;

        let request = self
            .payment_repo
            .set_status(request.id, PaymentStatus::Approved)
            .await?;

        self.enrollment_repo
            .upsert(request.user_id, request.course_id)
            .await?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            course_id = %request.course_id,
            admin_id = %ctx.user_id,
            "Payment request approved, enrollment granted"
        );

        // Commit point passed; everything below is best-effort.
        self.hints.publish_hint(EnrollmentEvent::EnrollmentApproved {
            user_id: request.user_id,
            course_id: request.course_id,
            course_name: course.title.clone(),
            timestamp: Utc::now(),
        });

        self.enqueue_approval_email(&student, &course).await;

        let student_message = format!(
            "Your payment for \"{}\" was approved. The course is now unlocked.",
            course.title
        );
        if let Err(e) = self
            .notifications
            .ledger()
            .append_personal(student.id, student_message, NotificationLevel::Success)
            .await
        {
            warn!(request_id = %request.id, error = %e, "Failed to append student ledger entry");
        }

        let admin_message = format!(
            "Approved payment from {} for \"{}\"",
            student.name, course.title
        );
        if let Err(e) = self
            .notifications
            .ledger()
            .append_global(admin_message, NotificationLevel::Success)
            .await
        {
            warn!(request_id = %request.id, error = %e, "Failed to append admin ledger entry");
        }

        if let Err(e) = self.enrollments.invalidate(request.user_id).await {
            warn!(user_id = %request.user_id, error = %e, "Failed to invalidate enrollment cache");
        }

        Ok(request)
    }

    /// Cancels a prior approval, revoking access.
    ///
    /// Effects, in order: delete the enrollment row (absence tolerated —
    /// it may already be gone out-of-band); revert status to `pending`;
    /// publish the `enrollment-cancelled` hint; append a warning to the
    /// student's ledger. Cancellation is reversible, unlike rejection.
    pub async fn cancel_approval(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<PaymentRequest> {
        ctx.require_admin()?;

        let request = self.require_request(request_id).await?;
        if request.status != PaymentStatus::Approved {
            return Err(AppError::validation(
                "Only an approved payment request can be cancelled",
            ));
        }

        let course = self.require_course(request.course_id).await?;
        let student = self.require_user(request.user_id).await?;

        let removed = self
            .enrollment_repo
            .delete(request.user_id, request.course_id)
            .await?;

        let request = self
            .payment_repo
            .set_status(request.id, PaymentStatus::Pending)
            .await?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            course_id = %request.course_id,
            admin_id = %ctx.user_id,
            enrollment_removed = removed,
            "Approval cancelled, access revoked"
        );

        self.hints.publish_hint(EnrollmentEvent::EnrollmentCancelled {
            user_id: request.user_id,
            course_id: request.course_id,
            course_name: course.title.clone(),
            timestamp: Utc::now(),
        });

        let student_message = format!(
            "Your access to \"{}\" was revoked. The payment request is pending review again.",
            course.title
        );
        if let Err(e) = self
            .notifications
            .ledger()
            .append_personal(student.id, student_message, NotificationLevel::Warning)
            .await
        {
            warn!(request_id = %request.id, error = %e, "Failed to append student ledger entry");
        }

        if let Err(e) = self.enrollments.invalidate(request.user_id).await {
            warn!(user_id = %request.user_id, error = %e, "Failed to invalidate enrollment cache");
        }

        Ok(request)
    }

    /// Rejects a pending payment request. One-way: no enrollment side
    /// effects, no broadcast, and no automatic path back to pending.
    pub async fn reject(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<PaymentRequest> {
        ctx.require_admin()?;

        let request = self.require_request(request_id).await?;
        if !request.status.can_transition_to(PaymentStatus::Rejected) {
            return Err(AppError::validation(format!(
                "Cannot reject a payment request in status '{}'",
                request.status
            )));
        }

        let request = self
            .payment_repo
            .set_status(request.id, PaymentStatus::Rejected)
            .await?;

        info!(
            request_id = %request.id,
            admin_id = %ctx.user_id,
            "Payment request rejected"
        );

        Ok(request)
    }

    /// Hard-deletes a payment request and any linked enrollment.
    ///
    /// The enrollment removal is attempted first so that a partial
    /// failure leaves the payment request as the durable record of what
    /// happened. Irreversible.
    pub async fn hard_delete(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;

        let request = self.require_request(request_id).await?;

        self.enrollment_repo
            .delete(request.user_id, request.course_id)
            .await?;

        self.payment_repo.delete(request.id).await?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            course_id = %request.course_id,
            admin_id = %ctx.user_id,
            "Payment request hard-deleted"
        );

        if let Err(e) = self.enrollments.invalidate(request.user_id).await {
            warn!(user_id = %request.user_id, error = %e, "Failed to invalidate enrollment cache");
        }

        Ok(())
    }

    /// Lists all payment requests, newest first (admin view).
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<PaymentRequest>> {
        ctx.require_admin()?;
        self.payment_repo.find_all(&page).await
    }

    /// Lists the current user's own payment requests, newest first.
    pub async fn list_mine(&self, ctx: &RequestContext) -> AppResult<Vec<PaymentRequest>> {
        self.payment_repo.find_by_user(ctx.user_id).await
    }

    /// Resolves the current request for the caller and a course —
    /// most-recently-created row wins when duplicates exist.
    pub async fn current_for_course(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
    ) -> AppResult<Option<PaymentRequest>> {
        self.payment_repo
            .find_current_for_pair(ctx.user_id, course_id)
            .await
    }

    /// Enqueues the approval email job; failure to enqueue is logged and
    /// absorbed (explicitly fire-and-forget).
    async fn enqueue_approval_email(&self, student: &User, course: &Course) {
        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            job_type: APPROVAL_EMAIL_JOB.to_string(),
            queue: MAIL_QUEUE.to_string(),
            priority: JobPriority::High,
            payload: serde_json::json!({
                "student_email": student.email,
                "course_name": course.title,
            }),
            result: None,
            error_message: None,
            status: JobStatus::Pending,
            attempts: 0,
            max_attempts: MAIL_MAX_ATTEMPTS,
            scheduled_at: None,
            started_at: None,
            completed_at: None,
            worker_id: None,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.job_repo.create(&job).await {
            warn!(
                student_id = %student.id,
                course_id = %course.id,
                error = %e,
                "Failed to enqueue approval email"
            );
        }
    }

    async fn require_request(&self, request_id: Uuid) -> AppResult<PaymentRequest> {
        self.payment_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Payment request not found"))
    }

    async fn require_course(&self, course_id: Uuid) -> AppResult<Course> {
        self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))
    }

    async fn require_user(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
