//! ITQAN Academy Server — e-learning platform backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use itqan_core::config::AppConfig;
use itqan_core::error::AppError;
use itqan_core::traits::hints::HintSink;

#[tokio::main]
async fn main() {
    let env = std::env::var("ITQAN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ITQAN Academy v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 0: Create data directories ──────────────────────────
    create_data_directories(&config).await?;

    // ── Step 1: Database connection + migrations ─────────────────
    let db = itqan_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    itqan_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Initialize cache ─────────────────────────────────
    let cache = Arc::new(itqan_cache::provider::CacheManager::new(&config.cache)?);
    tracing::info!(provider = %config.cache.provider, "Cache initialized");

    // ── Step 3: Initialize object storage ────────────────────────
    let storage = Arc::new(itqan_storage::manager::StorageManager::new(&config.storage).await?);
    tracing::info!(provider = %config.storage.provider, "Object storage initialized");

    // ── Step 4: Initialize repositories ──────────────────────────
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
        itqan_database::repositories::notification::NotificationRepository::new(db_pool.clone()),
    );
    let job_repo = Arc::new(itqan_database::repositories::job::JobRepository::new(
        db_pool.clone(),
    ));

    // ── Step 5: Initialize auth primitives ───────────────────────
    let password_hasher = Arc::new(itqan_auth::password::hasher::PasswordHasher::new());
    let password_validator = itqan_auth::password::validator::PasswordValidator::new(&config.auth);
    let jwt_encoder = Arc::new(itqan_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(itqan_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // ── Step 6: Initialize realtime engine ───────────────────────
    let realtime = Arc::new(itqan_realtime::engine::RealtimeEngine::new(
        config.realtime.clone(),
    ));
    let hints: Arc<dyn HintSink> = Arc::new(realtime.hints.clone());

    // ── Step 7: Initialize services ──────────────────────────────
    let ledger = itqan_service::notification::ledger::NotificationLedger::new(Arc::clone(&cache));
    let notification_service = itqan_service::notification::service::NotificationService::new(
        Arc::clone(&notification_repo),
        Arc::clone(&user_repo),
        ledger,
    );

    let access_policy =
        itqan_service::enrollment::access::AccessPolicy::new(config.auth.super_admin_email.clone());
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

    tracing::info!("Services initialized");

    // ── Step 8: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 9: Start background worker ──────────────────────────
    let worker_handle = if config.worker.enabled {
        let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().to_string()[..8]);

        let job_queue = Arc::new(itqan_worker::queue::JobQueue::new(
            Arc::clone(&job_repo),
            worker_id.clone(),
        ));

        let mut job_executor = itqan_worker::executor::JobExecutor::new();

        let mailer = itqan_service::email::mailer::ApprovalMailer::new(config.mailer.clone());
        job_executor.register(Arc::new(itqan_worker::jobs::email::ApprovalEmailHandler::new(
            mailer,
        )));

        job_executor.register(Arc::new(
            itqan_worker::jobs::notification::NotificationTrimHandler::new(
                Arc::clone(&notification_repo),
                config.worker.notification_cleanup_after_days as i64,
                config.worker.max_stored_notifications_per_user as i64,
            ),
        ));

        let job_executor = Arc::new(job_executor);
        let worker_runner = itqan_worker::runner::WorkerRunner::new(
            Arc::clone(&job_queue),
            job_executor,
            config.worker.clone(),
            worker_id,
        );

        spawn_retention_scheduler(Arc::clone(&job_queue), shutdown_rx.clone());

        let worker_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            worker_runner.run(worker_cancel).await;
        });

        tracing::info!("Background worker started");
        Some(handle)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 10: Build and start HTTP server ─────────────────────
    let app_state = itqan_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        cache: Arc::clone(&cache),
        storage: Arc::clone(&storage),
        jwt_encoder: Arc::clone(&jwt_encoder),
        jwt_decoder: Arc::clone(&jwt_decoder),
        realtime: Arc::clone(&realtime),
        user_service: Arc::new(user_service),
        course_service: Arc::new(course_service),
        payment_service: Arc::new(payment_service),
        enrollment_service: Arc::new(enrollment_service),
        notification_service: Arc::new(notification_service),
    };

    let app = itqan_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ITQAN server listening on {}", addr);

    // ── Step 11: Graceful shutdown ───────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 12: Wait for background tasks ───────────────────────
    realtime.shutdown().await?;

    if let Some(handle) = worker_handle {
        let _ = tokio::time::timeout(
            std::time::Duration::from_secs(config.server.shutdown_grace_seconds),
            handle,
        )
        .await;
    }

    tracing::info!("ITQAN server shut down gracefully");
    Ok(())
}

/// Create required data directories.
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let dirs = [
        config.storage.data_root.clone(),
        config.storage.local.root_path.clone(),
    ];

    for dir in &dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{dir}': {e}")))?;
    }

    Ok(())
}

/// Enqueues the daily notification retention job.
fn spawn_retention_scheduler(
    job_queue: Arc<itqan_worker::queue::JobQueue>,
    mut cancel: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(24 * 60 * 60));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let params = itqan_worker::queue::JobCreateParams {
                        job_type: "notification_trim".to_string(),
                        queue: "maintenance".to_string(),
                        priority: itqan_entity::job::JobPriority::Low,
                        payload: serde_json::json!({}),
                        max_attempts: 1,
                        scheduled_at: None,
                    };
                    if let Err(e) = job_queue.enqueue(params).await {
                        tracing::error!(error = %e, "Failed to enqueue notification retention job");
                    }
                }
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        break;
                    }
                }
            }
        }
    });
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
