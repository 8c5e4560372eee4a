//! Course CRUD with a read-through list cache.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use itqan_cache::keys;
use itqan_cache::provider::CacheManager;
use itqan_core::error::AppError;
use itqan_core::result::AppResult;
use itqan_core::traits::cache::CacheProvider;
use itqan_database::repositories::course::CourseRepository;
use itqan_entity::course::model::{Course, CreateCourse, UpdateCourse};
use itqan_storage::manager::StorageManager;

use crate::context::RequestContext;
use crate::media::validate_image;

/// TTL for cached course lists.
const COURSE_CACHE_TTL: Duration = Duration::from_secs(120);

/// Manages course content. Mutations are admin-only; students see only
/// published courses.
#[derive(Debug, Clone)]
pub struct CourseService {
    /// Course repository.
    course_repo: Arc<CourseRepository>,
    /// Cache manager.
    cache: Arc<CacheManager>,
    /// Media storage.
    storage: Arc<StorageManager>,
    /// Thumbnail size ceiling in bytes.
    max_image_size_bytes: u64,
}

impl CourseService {
    /// Creates a new course service.
    pub fn new(
        course_repo: Arc<CourseRepository>,
        cache: Arc<CacheManager>,
        storage: Arc<StorageManager>,
        max_image_size_bytes: u64,
    ) -> Self {
        Self {
            course_repo,
            cache,
            storage,
            max_image_size_bytes,
        }
    }

    /// Lists published courses (student view), read-through cached.
    pub async fn list_published(&self) -> AppResult<Vec<Course>> {
        let key = keys::course_list();
        if let Some(cached) = self.cache.get_json::<Vec<Course>>(&key).await? {
            return Ok(cached);
        }

        let courses = self.course_repo.find_published().await?;
        self.cache.set_json(&key, &courses, COURSE_CACHE_TTL).await?;
        Ok(courses)
    }

    /// Lists all courses (admin view), read-through cached.
    pub async fn list_all(&self, ctx: &RequestContext) -> AppResult<Vec<Course>> {
        ctx.require_admin()?;

        let key = keys::course_list_all();
        if let Some(cached) = self.cache.get_json::<Vec<Course>>(&key).await? {
            return Ok(cached);
        }

        let courses = self.course_repo.find_all().await?;
        self.cache.set_json(&key, &courses, COURSE_CACHE_TTL).await?;
        Ok(courses)
    }

    /// Fetches a single course.
    pub async fn get(&self, course_id: Uuid) -> AppResult<Course> {
        self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))
    }

    /// Creates a new course (admin only).
    pub async fn create(&self, ctx: &RequestContext, data: CreateCourse) -> AppResult<Course> {
        ctx.require_admin()?;

        if data.title.trim().is_empty() {
            return Err(AppError::validation("Course title is required"));
        }

        let course = self.course_repo.create(&data).await?;
        info!(course_id = %course.id, admin_id = %ctx.user_id, "Course created");

        self.invalidate_lists().await?;
        Ok(course)
    }

    /// Updates an existing course (admin only).
    pub async fn update(&self, ctx: &RequestContext, data: UpdateCourse) -> AppResult<Course> {
        ctx.require_admin()?;

        let course = self.course_repo.update(&data).await?;
        info!(course_id = %course.id, admin_id = %ctx.user_id, "Course updated");

        self.invalidate_lists().await?;
        Ok(course)
    }

    /// Deletes a course (admin only).
    pub async fn delete(&self, ctx: &RequestContext, course_id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;

        if !self.course_repo.delete(course_id).await? {
            return Err(AppError::not_found("Course not found"));
        }
        info!(course_id = %course_id, admin_id = %ctx.user_id, "Course deleted");

        self.invalidate_lists().await
    }

    /// Uploads a course thumbnail and stores its public URL (admin only).
    pub async fn upload_thumbnail(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<Course> {
        ctx.require_admin()?;

        let extension = validate_image(content_type, &data, self.max_image_size_bytes, "Thumbnail")?;

        // Verify the course exists before uploading anything.
        self.get(course_id).await?;

        let url = self
            .storage
            .put_media("thumbnails", course_id, extension, content_type, data)
            .await?;

        let course = self
            .course_repo
            .update(&UpdateCourse {
                id: course_id,
                title: None,
                video_url: None,
                thumbnail_url: Some(url),
                status: None,
            })
            .await?;

        self.invalidate_lists().await?;
        Ok(course)
    }

    async fn invalidate_lists(&self) -> AppResult<()> {
        self.cache.delete(&keys::course_list()).await?;
        self.cache.delete(&keys::course_list_all()).await
    }
}
