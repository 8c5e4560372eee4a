//! Integration tests for the payment approval workflow.

mod helpers;

use http::StatusCode;

use helpers::{TestApp, TINY_PNG};
use itqan_entity::payment::PaymentStatus;
use itqan_entity::user::UserRole;

#[tokio::test]
async fn test_submit_creates_pending_request() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email("submit");
    app.create_user(&email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    let token = app.login(&email, "tr4ctor-beam-ostrich!", "STUDENT").await;
    let course = app.create_course("FullStack Mastery").await;

    let response = app
        .submit_payment(&token, course, 49.0, TINY_PNG, "image/png")
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "pending");

    let receipt_url = response.body["data"]["receipt_url"]
        .as_str()
        .expect("receipt_url");
    assert!(receipt_url.contains("receipts/"), "namespaced receipt path");
}

#[tokio::test]
async fn test_submit_rejects_oversized_receipt() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email("oversize");
    app.create_user(&email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    let token = app.login(&email, "tr4ctor-beam-ostrich!", "STUDENT").await;
    let course = app.create_course("UI/UX Principles").await;

    // 6 MB of zeroes exceeds the 5 MB ceiling and is rejected before
    // any storage write.
    let oversized = vec![0u8; 6 * 1024 * 1024];
    let response = app
        .submit_payment(&token, course, 49.0, &oversized, "image/png")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let requests: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM payment_requests WHERE course_id = $1")
            .bind(course)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(requests, 0);
}

#[tokio::test]
async fn test_duplicate_submissions_are_permitted() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email("dup");
    let user = app
        .create_user(&email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    let token = app.login(&email, "tr4ctor-beam-ostrich!", "STUDENT").await;
    let course = app.create_course("Database Architecture").await;

    let first = app
        .submit_payment(&token, course, 49.0, TINY_PNG, "image/png")
        .await;
    let second = app
        .submit_payment(&token, course, 59.0, TINY_PNG, "image/png")
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM payment_requests WHERE user_id = $1 AND course_id = $2",
    )
    .bind(user)
    .bind(course)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(rows, 2);

    // Most-recently-created row governs the current display.
    let current = app
        .request(
            "GET",
            &format!("/api/payments/current/{course}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(current.status, StatusCode::OK);
    assert_eq!(
        current.body["data"]["id"],
        second.body["data"]["id"],
        "newest request wins"
    );
}

#[tokio::test]
async fn test_approve_grants_enrollment_and_notifies_student() {
    let app = TestApp::new().await;
    let student_email = TestApp::unique_email("student");
    let admin_email = TestApp::unique_email("admin");
    let student = app
        .create_user(&student_email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    app.create_user(&admin_email, "tr4ctor-beam-ostrich!", UserRole::Admin)
        .await;
    let admin_token = app.login(&admin_email, "tr4ctor-beam-ostrich!", "ADMIN").await;

    let course = app.create_course("Advanced React Patterns").await;
    let request = app
        .create_payment_request(student, course, PaymentStatus::Pending)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/payments/{request}/approve"),
            None,
            Some(&admin_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "approved");
    assert_eq!(app.enrollment_count(student, course).await, 1);

    // The student's personal ledger references the course title.
    let entries = app
        .state
        .notification_service
        .ledger()
        .personal(student)
        .await
        .unwrap();
    assert!(
        entries
            .iter()
            .any(|e| e.message.contains("Advanced React Patterns")),
        "student ledger mentions the course"
    );

    // The approval email job was enqueued for the worker.
    let jobs: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM jobs WHERE job_type = 'approval_email' AND payload->>'student_email' = $1",
    )
    .bind(&student_email)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(jobs, 1);
}

#[tokio::test]
async fn test_double_approval_is_idempotent() {
    let app = TestApp::new().await;
    let student = app
        .create_user(
            &TestApp::unique_email("student"),
            "tr4ctor-beam-ostrich!",
            UserRole::Student,
        )
        .await;
    let admin_email = TestApp::unique_email("admin");
    app.create_user(&admin_email, "tr4ctor-beam-ostrich!", UserRole::Admin)
        .await;
    let admin_token = app.login(&admin_email, "tr4ctor-beam-ostrich!", "ADMIN").await;

    let course = app.create_course("UI/UX Principles").await;
    let request = app
        .create_payment_request(student, course, PaymentStatus::Pending)
        .await;

    let path = format!("/api/admin/payments/{request}/approve");
    let first = app.request("POST", &path, None, Some(&admin_token)).await;
    let second = app.request("POST", &path, None, Some(&admin_token)).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK, "{:?}", second.body);
    assert_eq!(app.payment_status(request).await.as_deref(), Some("approved"));
    assert_eq!(
        app.enrollment_count(student, course).await,
        1,
        "exactly one enrollment row after double approval"
    );
}

#[tokio::test]
async fn test_cancellation_is_reversible() {
    let app = TestApp::new().await;
    let student = app
        .create_user(
            &TestApp::unique_email("student"),
            "tr4ctor-beam-ostrich!",
            UserRole::Student,
        )
        .await;
    let admin_email = TestApp::unique_email("admin");
    app.create_user(&admin_email, "tr4ctor-beam-ostrich!", UserRole::Admin)
        .await;
    let admin_token = app.login(&admin_email, "tr4ctor-beam-ostrich!", "ADMIN").await;

    let course = app.create_course("FullStack Mastery").await;
    let request = app
        .create_payment_request(student, course, PaymentStatus::Pending)
        .await;

    let approve_path = format!("/api/admin/payments/{request}/approve");
    let approve = app
        .request("POST", &approve_path, None, Some(&admin_token))
        .await;
    assert_eq!(approve.status, StatusCode::OK);

    // Cancel: intermediate state shows pending and no enrollment row.
    let cancel = app
        .request(
            "POST",
            &format!("/api/admin/payments/{request}/cancel?confirm=true"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(cancel.status, StatusCode::OK, "{:?}", cancel.body);
    assert_eq!(app.payment_status(request).await.as_deref(), Some("pending"));
    assert_eq!(app.enrollment_count(student, course).await, 0);

    // Approve again: access restored, status approved.
    let reapprove = app
        .request("POST", &approve_path, None, Some(&admin_token))
        .await;
    assert_eq!(reapprove.status, StatusCode::OK);
    assert_eq!(app.payment_status(request).await.as_deref(), Some("approved"));
    assert_eq!(app.enrollment_count(student, course).await, 1);
}

#[tokio::test]
async fn test_cancel_requires_explicit_confirmation() {
    let app = TestApp::new().await;
    let student = app
        .create_user(
            &TestApp::unique_email("student"),
            "tr4ctor-beam-ostrich!",
            UserRole::Student,
        )
        .await;
    let admin_email = TestApp::unique_email("admin");
    app.create_user(&admin_email, "tr4ctor-beam-ostrich!", UserRole::Admin)
        .await;
    let admin_token = app.login(&admin_email, "tr4ctor-beam-ostrich!", "ADMIN").await;

    let course = app.create_course("Database Architecture").await;
    let request = app
        .create_payment_request(student, course, PaymentStatus::Approved)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/payments/{request}/cancel"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.payment_status(request).await.as_deref(), Some("approved"));
}

#[tokio::test]
async fn test_reject_has_no_side_effects() {
    let app = TestApp::new().await;
    let student = app
        .create_user(
            &TestApp::unique_email("student"),
            "tr4ctor-beam-ostrich!",
            UserRole::Student,
        )
        .await;
    let admin_email = TestApp::unique_email("admin");
    app.create_user(&admin_email, "tr4ctor-beam-ostrich!", UserRole::Admin)
        .await;
    let admin_token = app.login(&admin_email, "tr4ctor-beam-ostrich!", "ADMIN").await;

    let course = app.create_course("UI/UX Principles").await;
    let request = app
        .create_payment_request(student, course, PaymentStatus::Pending)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/payments/{request}/reject"),
            None,
            Some(&admin_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.payment_status(request).await.as_deref(), Some("rejected"));
    assert_eq!(
        app.enrollment_count(student, course).await,
        0,
        "rejection creates no enrollment"
    );
}

#[tokio::test]
async fn test_rejected_request_cannot_be_approved() {
    let app = TestApp::new().await;
    let student = app
        .create_user(
            &TestApp::unique_email("student"),
            "tr4ctor-beam-ostrich!",
            UserRole::Student,
        )
        .await;
    let admin_email = TestApp::unique_email("admin");
    app.create_user(&admin_email, "tr4ctor-beam-ostrich!", UserRole::Admin)
        .await;
    let admin_token = app.login(&admin_email, "tr4ctor-beam-ostrich!", "ADMIN").await;

    let course = app.create_course("FullStack Mastery").await;
    let request = app
        .create_payment_request(student, course, PaymentStatus::Rejected)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/payments/{request}/approve"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.enrollment_count(student, course).await, 0);
}

#[tokio::test]
async fn test_hard_delete_cascades_to_enrollment() {
    let app = TestApp::new().await;
    let student = app
        .create_user(
            &TestApp::unique_email("student"),
            "tr4ctor-beam-ostrich!",
            UserRole::Student,
        )
        .await;
    let admin_email = TestApp::unique_email("admin");
    app.create_user(&admin_email, "tr4ctor-beam-ostrich!", UserRole::Admin)
        .await;
    let admin_token = app.login(&admin_email, "tr4ctor-beam-ostrich!", "ADMIN").await;

    let course = app.create_course("Advanced React Patterns").await;
    let request = app
        .create_payment_request(student, course, PaymentStatus::Pending)
        .await;

    let approve = app
        .request(
            "POST",
            &format!("/api/admin/payments/{request}/approve"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(approve.status, StatusCode::OK);

    let delete = app
        .request(
            "DELETE",
            &format!("/api/admin/payments/{request}?confirm=true"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::OK, "{:?}", delete.body);

    assert_eq!(app.payment_status(request).await, None, "request row gone");
    assert_eq!(
        app.enrollment_count(student, course).await,
        0,
        "linked enrollment gone"
    );
}

#[tokio::test]
async fn test_student_cannot_approve() {
    let app = TestApp::new().await;
    let student_email = TestApp::unique_email("student");
    let student = app
        .create_user(&student_email, "tr4ctor-beam-ostrich!", UserRole::Student)
        .await;
    let token = app
        .login(&student_email, "tr4ctor-beam-ostrich!", "STUDENT")
        .await;

    let course = app.create_course("UI/UX Principles").await;
    let request = app
        .create_payment_request(student, course, PaymentStatus::Pending)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/payments/{request}/approve"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.payment_status(request).await.as_deref(), Some("pending"));
}
