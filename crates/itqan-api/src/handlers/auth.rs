//! Auth handlers — signup, login, me.

use axum::Json;
use axum::extract::State;

use itqan_core::error::AppError;

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{ApiResponse, AuthResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validator::Validate::validate(&req)
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let result = state
        .user_service
        .signup(&req.name, &req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        token: result.token.token,
        expires_at: result.token.expires_at,
        user: result.user.into(),
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validator::Validate::validate(&req)
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let result = state
        .user_service
        .login(&req.email, &req.password, req.role)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        token: result.token.token,
        expires_at: result.token.expires_at,
        user: result.user.into(),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.profile(auth.context()).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
