//! Payment request handlers — student submission plus the admin
//! approval workflow.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use uuid::Uuid;

use itqan_core::error::AppError;
use itqan_core::types::pagination::{PageRequest, PageResponse};
use itqan_entity::payment::model::PaymentRequest;
use itqan_service::payment::submit::SubmitPaymentParams;

use crate::dto::request::ConfirmQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/payments — multipart submission with fields `course_id`,
/// `amount`, and the `receipt` image.
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<PaymentRequest>>, ApiError> {
    let mut course_id: Option<Uuid> = None;
    let mut amount: Option<f64> = None;
    let mut receipt: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(AppError::validation(format!("Malformed upload: {e}"))))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("course_id") => {
                let text = field.text().await.map_err(|e| {
                    ApiError(AppError::validation(format!("Invalid course_id field: {e}")))
                })?;
                course_id = Some(text.parse().map_err(|_| {
                    ApiError(AppError::validation("course_id must be a UUID"))
                })?);
            }
            Some("amount") => {
                let text = field.text().await.map_err(|e| {
                    ApiError(AppError::validation(format!("Invalid amount field: {e}")))
                })?;
                amount = Some(text.parse().map_err(|_| {
                    ApiError(AppError::validation("amount must be a number"))
                })?);
            }
            Some("receipt") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    ApiError(AppError::validation(format!("Failed to read receipt: {e}")))
                })?;
                receipt = Some((content_type, data));
            }
            _ => {}
        }
    }

    let course_id =
        course_id.ok_or_else(|| ApiError(AppError::validation("course_id is required")))?;
    let amount = amount.ok_or_else(|| ApiError(AppError::validation("amount is required")))?;
    let (content_type, receipt) =
        receipt.ok_or_else(|| ApiError(AppError::validation("A receipt image is required")))?;

    let request = state
        .payment_service
        .submit(
            auth.context(),
            SubmitPaymentParams {
                course_id,
                amount,
                content_type,
                receipt,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/payments/mine — the caller's own requests, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<PaymentRequest>>>, ApiError> {
    let requests = state.payment_service.list_mine(auth.context()).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/payments/current/{course_id} — the caller's current request
/// for a course (most-recently-created wins across duplicates).
pub async fn current_for_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<PaymentRequest>>>, ApiError> {
    let request = state
        .payment_service
        .current_for_course(auth.context(), course_id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/admin/payments — every request, newest first.
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<PaymentRequest>>>, ApiError> {
    let requests = state.payment_service.list_all(auth.context(), page).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// POST /api/admin/payments/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PaymentRequest>>, ApiError> {
    let request = state
        .payment_service
        .approve(auth.context(), request_id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/admin/payments/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PaymentRequest>>, ApiError> {
    let request = state
        .payment_service
        .reject(auth.context(), request_id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/admin/payments/{id}/cancel — destructive, requires
/// `?confirm=true`.
pub async fn cancel_approval(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<PaymentRequest>>, ApiError> {
    require_confirmation(query.confirm, "cancel this approval")?;

    let request = state
        .payment_service
        .cancel_approval(auth.context(), request_id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// DELETE /api/admin/payments/{id} — destructive and irreversible,
/// requires `?confirm=true`.
pub async fn hard_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_confirmation(query.confirm, "delete this payment request")?;

    state
        .payment_service
        .hard_delete(auth.context(), request_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Payment request deleted".to_string(),
    })))
}

fn require_confirmation(confirmed: bool, action: &str) -> Result<(), ApiError> {
    if confirmed {
        Ok(())
    } else {
        Err(ApiError(AppError::validation(format!(
            "Pass confirm=true to {action}"
        ))))
    }
}
