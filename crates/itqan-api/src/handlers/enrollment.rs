//! Enrollment handlers — listing and access derivation.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use itqan_entity::enrollment::Enrollment;

use crate::dto::request::FreshQuery;
use crate::dto::response::{AccessResponse, ApiResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/enrollments/mine — the caller's enrollments.
///
/// Served from the read-through cache by default; `?fresh=true` forces
/// the authoritative table read that clients reconcile hint state
/// against on dashboard open or refresh.
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FreshQuery>,
) -> Result<Json<ApiResponse<Vec<Enrollment>>>, ApiError> {
    let enrollments = if query.fresh {
        state
            .enrollment_service
            .list_for_user_fresh(auth.user_id)
            .await?
    } else {
        state.enrollment_service.list_for_user(auth.user_id).await?
    };
    Ok(Json(ApiResponse::ok(enrollments)))
}

/// GET /api/courses/{course_id}/access — authoritative access check.
pub async fn check_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccessResponse>>, ApiError> {
    let has_access = state
        .enrollment_service
        .has_access(auth.user_id, course_id)
        .await?;
    Ok(Json(ApiResponse::ok(AccessResponse {
        course_id,
        has_access,
    })))
}
