//! User profile handlers.

use axum::Json;
use axum::extract::{Multipart, Query, State};

use itqan_core::error::AppError;
use itqan_core::types::pagination::{PageRequest, PageResponse};

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.profile(auth.context()).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    validator::Validate::validate(&req)
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let user = state
        .user_service
        .update_profile(auth.context(), req.name)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users/me/profile-image
pub async fn upload_profile_image(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let (content_type, data) = read_image_field(multipart).await?;
    let user = state
        .user_service
        .upload_profile_image(auth.context(), &content_type, data)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users/me/cover-image
pub async fn upload_cover_image(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let (content_type, data) = read_image_field(multipart).await?;
    let user = state
        .user_service
        .upload_cover_image(auth.context(), &content_type, data)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/admin/users — student directory.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let users = state.user_service.list(auth.context(), page).await?;

    let mapped = PageResponse::new(
        users.items.into_iter().map(UserResponse::from).collect(),
        users.page,
        users.page_size,
        users.total_items,
    );
    Ok(Json(ApiResponse::ok(mapped)))
}

/// Reads the single image field out of a multipart body.
pub(crate) async fn read_image_field(
    mut multipart: Multipart,
) -> Result<(String, bytes::Bytes), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(AppError::validation(format!("Malformed upload: {e}"))))?
    {
        if field.name() == Some("image") || field.name() == Some("file") {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError(AppError::validation(format!("Failed to read upload: {e}"))))?;
            return Ok((content_type, data));
        }
    }

    Err(ApiError(AppError::validation(
        "Missing 'image' field in upload",
    )))
}
