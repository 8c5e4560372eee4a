//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use itqan_auth::jwt::decoder::JwtDecoder;
use itqan_auth::jwt::encoder::JwtEncoder;
use itqan_cache::provider::CacheManager;
use itqan_core::config::AppConfig;
use itqan_realtime::engine::RealtimeEngine;
use itqan_storage::manager::StorageManager;

use itqan_service::course::service::CourseService;
use itqan_service::enrollment::service::EnrollmentService;
use itqan_service::notification::service::NotificationService;
use itqan_service::payment::service::PaymentService;
use itqan_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or internally `Arc`-backed for cheap
/// cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager.
    pub cache: Arc<CacheManager>,
    /// Object storage manager.
    pub storage: Arc<StorageManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Realtime ─────────────────────────────────────────────
    /// WebSocket hint channel engine.
    pub realtime: Arc<RealtimeEngine>,

    // ── Services ─────────────────────────────────────────────
    /// Account and profile service.
    pub user_service: Arc<UserService>,
    /// Course content service.
    pub course_service: Arc<CourseService>,
    /// Payment approval workflow.
    pub payment_service: Arc<PaymentService>,
    /// Enrollment queries and access derivation.
    pub enrollment_service: Arc<EnrollmentService>,
    /// Notification fan-out (both tiers).
    pub notification_service: Arc<NotificationService>,
}
