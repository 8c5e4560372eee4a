//! Course handlers — student listing plus admin management.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use uuid::Uuid;

use itqan_core::error::AppError;
use itqan_entity::course::model::{Course, CreateCourse, UpdateCourse};
use itqan_entity::course::status::CourseStatus;

use crate::dto::request::{CreateCourseRequest, UpdateCourseRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::user::read_image_field;
use crate::state::AppState;

/// GET /api/courses — published courses (student view).
pub async fn list_published(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Course>>>, ApiError> {
    let courses = state.course_service.list_published().await?;
    Ok(Json(ApiResponse::ok(courses)))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    let course = state.course_service.get(course_id).await?;
    Ok(Json(ApiResponse::ok(course)))
}

/// GET /api/admin/courses — all courses including drafts.
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Course>>>, ApiError> {
    let courses = state.course_service.list_all(auth.context()).await?;
    Ok(Json(ApiResponse::ok(courses)))
}

/// POST /api/admin/courses
pub async fn create_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCourseRequest>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    validator::Validate::validate(&req)
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let course = state
        .course_service
        .create(
            auth.context(),
            CreateCourse {
                title: req.title,
                video_url: req.video_url,
                thumbnail_url: None,
                status: req.status.unwrap_or(CourseStatus::Draft),
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(course)))
}

/// PUT /api/admin/courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    validator::Validate::validate(&req)
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let course = state
        .course_service
        .update(
            auth.context(),
            UpdateCourse {
                id: course_id,
                title: req.title,
                video_url: req.video_url,
                thumbnail_url: None,
                status: req.status,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(course)))
}

/// POST /api/admin/courses/{id}/thumbnail
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    let (content_type, data) = read_image_field(multipart).await?;
    let course = state
        .course_service
        .upload_thumbnail(auth.context(), course_id, &content_type, data)
        .await?;
    Ok(Json(ApiResponse::ok(course)))
}

/// DELETE /api/admin/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.course_service.delete(auth.context(), course_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Course deleted".to_string(),
    })))
}
