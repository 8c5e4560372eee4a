//! Health check handlers.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /api/health — liveness probe.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/health/detailed — checks each dependency.
pub async fn detailed_health(State(state): State<AppState>) -> Json<Value> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();

    let storage = state.storage.health_check().await.unwrap_or(false);

    use itqan_core::traits::cache::CacheProvider;
    let cache = state.cache.health_check().await.unwrap_or(false);

    let healthy = database && storage && cache;
    Json(json!({
        "status": if healthy { "ok" } else { "degraded" },
        "database": database,
        "storage": storage,
        "cache": cache,
        "realtime_connections": state.realtime.connections.connection_count(),
    }))
}
