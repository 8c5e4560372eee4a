//! Enrollment queries with a read-through cache.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use itqan_cache::keys;
use itqan_cache::provider::CacheManager;
use itqan_core::result::AppResult;
use itqan_core::traits::cache::CacheProvider;
use itqan_database::repositories::enrollment::EnrollmentRepository;
use itqan_database::repositories::user::UserRepository;
use itqan_entity::enrollment::Enrollment;

use super::access::AccessPolicy;

/// TTL for cached per-user enrollment lists.
const ENROLLMENT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Serves enrollment state and access derivation.
///
/// Listing is read-through: cached data is served when fresh, and every
/// authoritative fetch overwrites the cached copy. Mutating flows call
/// [`EnrollmentService::invalidate`] so the next read hits the table.
#[derive(Debug, Clone)]
pub struct EnrollmentService {
    /// Enrollment repository.
    enrollment_repo: Arc<EnrollmentRepository>,
    /// User repository (for access derivation).
    user_repo: Arc<UserRepository>,
    /// Cache manager.
    cache: Arc<CacheManager>,
    /// Pure access policy.
    policy: AccessPolicy,
}

impl EnrollmentService {
    /// Creates a new enrollment service.
    pub fn new(
        enrollment_repo: Arc<EnrollmentRepository>,
        user_repo: Arc<UserRepository>,
        cache: Arc<CacheManager>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            enrollment_repo,
            user_repo,
            cache,
            policy,
        }
    }

    /// Lists a user's enrollments, serving the cached copy when present
    /// and overwriting it after each authoritative fetch.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Enrollment>> {
        let key = keys::enrollments(user_id);
        if let Some(cached) = self.cache.get_json::<Vec<Enrollment>>(&key).await? {
            return Ok(cached);
        }

        let enrollments = self.enrollment_repo.find_by_user(user_id).await?;
        self.cache
            .set_json(&key, &enrollments, ENROLLMENT_CACHE_TTL)
            .await?;
        Ok(enrollments)
    }

    /// Lists a user's enrollments straight from the table, refreshing
    /// the cache — the authoritative read clients reconcile against.
    pub async fn list_for_user_fresh(&self, user_id: Uuid) -> AppResult<Vec<Enrollment>> {
        let enrollments = self.enrollment_repo.find_by_user(user_id).await?;
        self.cache
            .set_json(
                &keys::enrollments(user_id),
                &enrollments,
                ENROLLMENT_CACHE_TTL,
            )
            .await?;
        Ok(enrollments)
    }

    /// Derives whether a user may access a course right now.
    ///
    /// Always reads the enrollment table — this is the authoritative
    /// check, never satisfied from hints.
    pub async fn has_access(&self, user_id: Uuid, course_id: Uuid) -> AppResult<bool> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| itqan_core::AppError::not_found("User not found"))?;

        let enrolled = self.enrollment_repo.exists(user_id, course_id).await?;
        Ok(self.policy.has_access(&user, enrolled))
    }

    /// Drops the cached enrollment list for a user.
    pub async fn invalidate(&self, user_id: Uuid) -> AppResult<()> {
        self.cache.delete(&keys::enrollments(user_id)).await
    }
}
