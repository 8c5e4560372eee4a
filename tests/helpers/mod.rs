//! Shared test helpers for integration tests.
//!
//! Tests drive the real router via `tower::ServiceExt::oneshot` against
//! a live test database. Every test creates its own users and courses
//! (unique emails) so tests stay independent under parallel execution.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use itqan_api::state::AppState;
use itqan_core::config::AppConfig;
use itqan_core::traits::hints::HintSink;
use itqan_entity::payment::PaymentStatus;
use itqan_entity::user::UserRole;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// Full application state for direct service calls.
    pub state: AppState,
}

/// Captured response from a test request.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body (Null when the body is empty or not JSON).
    pub body: Value,
}

impl TestApp {
    /// Create a new test application wired exactly like the server binary.
    pub async fn new() -> Self {
        let config = AppConfig::load_file("tests/fixtures/test_config.toml")
            .expect("Failed to load test config");

        let db = itqan_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        itqan_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let cache = Arc::new(
            itqan_cache::provider::CacheManager::new(&config.cache).expect("Failed to init cache"),
        );
        let storage = Arc::new(
            itqan_storage::manager::StorageManager::new(&config.storage)
                .await
                .expect("Failed to init storage"),
        );

        let user_repo = Arc::new(itqan_database::repositories::user::UserRepository::new(
            db_pool.clone(),
        ));
        let course_repo = Arc::new(itqan_database::repositories::course::CourseRepository::new(
            db_pool.clone(),
        ));
        let enrollment_repo = Arc::new(
            itqan_database::repositories::enrollment::EnrollmentRepository::new(db_pool.clone()),
        );
        let payment_repo = Arc::new(
            itqan_database::repositories::payment::PaymentRequestRepository::new(db_pool.clone()),
        );
        let notification_repo = Arc::new(
            itqan_database::repositories::notification::NotificationRepository::new(
                db_pool.clone(),
            ),
        );
        let job_repo = Arc::new(itqan_database::repositories::job::JobRepository::new(
            db_pool.clone(),
        ));

        let password_hasher = Arc::new(itqan_auth::password::hasher::PasswordHasher::new());
        let password_validator =
            itqan_auth::password::validator::PasswordValidator::new(&config.auth);
        let jwt_encoder = Arc::new(itqan_auth::jwt::encoder::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(itqan_auth::jwt::decoder::JwtDecoder::new(&config.auth));

        let realtime = Arc::new(itqan_realtime::engine::RealtimeEngine::new(
            config.realtime.clone(),
        ));
        let hints: Arc<dyn HintSink> = Arc::new(realtime.hints.clone());

        let ledger =
            itqan_service::notification::ledger::NotificationLedger::new(Arc::clone(&cache));
        let notification_service = itqan_service::notification::service::NotificationService::new(
            Arc::clone(&notification_repo),
            Arc::clone(&user_repo),
            ledger,
        );

        let access_policy = itqan_service::enrollment::access::AccessPolicy::new(
            config.auth.super_admin_email.clone(),
        );
        let enrollment_service = itqan_service::enrollment::service::EnrollmentService::new(
            Arc::clone(&enrollment_repo),
            Arc::clone(&user_repo),
            Arc::clone(&cache),
            access_policy,
        );

        let payment_service = itqan_service::payment::service::PaymentService::new(
            Arc::clone(&payment_repo),
            Arc::clone(&enrollment_repo),
            Arc::clone(&course_repo),
            Arc::clone(&user_repo),
            Arc::clone(&job_repo),
            Arc::clone(&storage),
            notification_service.clone(),
            enrollment_service.clone(),
            hints,
            config.storage.max_receipt_size_bytes,
        );

        let course_service = itqan_service::course::service::CourseService::new(
            Arc::clone(&course_repo),
            Arc::clone(&cache),
            Arc::clone(&storage),
            config.storage.max_image_size_bytes,
        );

        let user_service = itqan_service::user::service::UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            password_validator,
            Arc::clone(&jwt_encoder),
            Arc::clone(&storage),
            config.auth.super_admin_email.clone(),
            config.storage.max_image_size_bytes,
        );

        let state = AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            cache,
            storage,
            jwt_encoder,
            jwt_decoder,
            realtime,
            user_service: Arc::new(user_service),
            course_service: Arc::new(course_service),
            payment_service: Arc::new(payment_service),
            enrollment_service: Arc::new(enrollment_service),
            notification_service: Arc::new(notification_service),
        };

        let router = itqan_api::router::build_router(state.clone());

        Self {
            router,
            db_pool,
            state,
        }
    }

    /// Returns a unique email for this test run.
    pub fn unique_email(prefix: &str) -> String {
        format!("{prefix}-{}@itqan.test", Uuid::new_v4())
    }

    /// Creates a user directly through the repository.
    pub async fn create_user(&self, email: &str, password: &str, role: UserRole) -> Uuid {
        let hasher = itqan_auth::password::hasher::PasswordHasher::new();
        let hash = hasher.hash_password(password).expect("hash");
        let user: (Uuid,) = sqlx::query_as(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind("Test User")
        .bind(email)
        .bind(hash)
        .bind(role)
        .fetch_one(&self.db_pool)
        .await
        .expect("create user");
        user.0
    }

    /// Creates a published course directly through the repository.
    pub async fn create_course(&self, title: &str) -> Uuid {
        let course: (Uuid,) = sqlx::query_as(
            "INSERT INTO courses (title, status) VALUES ($1, 'published') RETURNING id",
        )
        .bind(title)
        .fetch_one(&self.db_pool)
        .await
        .expect("create course");
        course.0
    }

    /// Inserts a payment request row directly.
    pub async fn create_payment_request(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        status: PaymentStatus,
    ) -> Uuid {
        let request: (Uuid,) = sqlx::query_as(
            "INSERT INTO payment_requests (user_id, course_id, amount, receipt_url, status) \
             VALUES ($1, $2, 49.0, 'http://localhost/receipt.png', $3) RETURNING id",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(status)
        .fetch_one(&self.db_pool)
        .await
        .expect("create payment request");
        request.0
    }

    /// Logs in through the API and returns the access token.
    pub async fn login(&self, email: &str, password: &str, role: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "role": role,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Makes a JSON request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        self.send(request).await
    }

    /// Submits a payment claim through the multipart endpoint.
    pub async fn submit_payment(
        &self,
        token: &str,
        course_id: Uuid,
        amount: f64,
        receipt: &[u8],
        receipt_content_type: &str,
    ) -> TestResponse {
        let boundary = "itqan-test-boundary";
        let mut body: Vec<u8> = Vec::new();

        for (name, value) in [
            ("course_id", course_id.to_string()),
            ("amount", amount.to_string()),
        ] {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\ncontent-disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }

        body.extend_from_slice(
            format!(
                "--{boundary}\r\ncontent-disposition: form-data; name=\"receipt\"; filename=\"receipt\"\r\ncontent-type: {receipt_content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(receipt);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/api/payments")
            .header("authorization", format!("Bearer {token}"))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request");

        self.send(request).await
    }

    /// Counts enrollment rows for a (user, course) pair.
    pub async fn enrollment_count(&self, user_id: Uuid, course_id: Uuid) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM enrollments WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("count enrollments")
    }

    /// Fetches a payment request's status string, if the row exists.
    pub async fn payment_status(&self, request_id: Uuid) -> Option<String> {
        sqlx::query_scalar("SELECT status::text FROM payment_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(&self.db_pool)
            .await
            .expect("fetch payment status")
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Minimal valid 1x1 PNG used as a receipt in upload tests.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];
