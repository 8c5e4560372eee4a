//! Route definitions for the ITQAN HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_image_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(course_routes())
        .merge(payment_routes())
        .merge(enrollment_routes())
        .merge(notification_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: signup, login, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users/me", put(handlers::user::update_profile))
        .route(
            "/users/me/profile-image",
            post(handlers::user::upload_profile_image),
        )
        .route(
            "/users/me/cover-image",
            post(handlers::user::upload_cover_image),
        )
}

/// Course listing and access checks (student-facing).
fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(handlers::course::list_published))
        .route("/courses/{id}", get(handlers::course::get_course))
        .route(
            "/courses/{course_id}/access",
            get(handlers::enrollment::check_access),
        )
}

/// Payment submission and the caller's own requests.
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(handlers::payment::submit))
        .route("/payments/mine", get(handlers::payment::list_mine))
        .route(
            "/payments/current/{course_id}",
            get(handlers::payment::current_for_course),
        )
}

/// Enrollment listing.
fn enrollment_routes() -> Router<AppState> {
    Router::new().route("/enrollments/mine", get(handlers::enrollment::list_mine))
}

/// Notification endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route("/notifications", delete(handlers::notification::clear))
        .route(
            "/notifications/ledger",
            get(handlers::notification::ledger),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

/// Admin-only endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Student directory
        .route("/admin/users", get(handlers::user::list_users))
        // Course management
        .route("/admin/courses", get(handlers::course::list_all))
        .route("/admin/courses", post(handlers::course::create_course))
        .route("/admin/courses/{id}", put(handlers::course::update_course))
        .route(
            "/admin/courses/{id}",
            delete(handlers::course::delete_course),
        )
        .route(
            "/admin/courses/{id}/thumbnail",
            post(handlers::course::upload_thumbnail),
        )
        // Payment approval workflow
        .route("/admin/payments", get(handlers::payment::list_all))
        .route(
            "/admin/payments/{id}/approve",
            post(handlers::payment::approve),
        )
        .route(
            "/admin/payments/{id}/reject",
            post(handlers::payment::reject),
        )
        .route(
            "/admin/payments/{id}/cancel",
            post(handlers::payment::cancel_approval),
        )
        .route(
            "/admin/payments/{id}",
            delete(handlers::payment::hard_delete),
        )
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
