//! Notification handlers — durable tier and ephemeral ledgers.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use itqan_entity::notification::{LedgerEntry, Notification};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query limiting durable notification reads.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    /// Maximum rows to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/notifications — durable notifications, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state
        .notification_service
        .list(auth.context(), query.limit.clamp(1, 100))
        .await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/ledger — merged personal + global ledgers,
/// newest first.
pub async fn ledger(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<LedgerEntry>>>, ApiError> {
    let entries = state
        .notification_service
        .ledger_entries(auth.context())
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<i64>>, ApiError> {
    let count = state
        .notification_service
        .unread_count(auth.context())
        .await?;
    Ok(Json(ApiResponse::ok(count)))
}

/// PUT /api/notifications/read-all — bulk mark-read across both tiers.
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let updated = state
        .notification_service
        .mark_all_read(auth.context())
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Marked {updated} notifications read"),
    })))
}

/// DELETE /api/notifications — clear both tiers for the caller.
pub async fn clear(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.notification_service.clear(auth.context()).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Notifications cleared".to_string(),
    })))
}
