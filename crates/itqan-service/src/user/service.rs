//! Signup, login, and profile management.
//!
//! Credentials are Argon2id hashes; the login path verifies a hash and
//! never compares plaintext. The configured super-admin email is
//! auto-promoted to ADMIN at signup, matching the platform's single
//! hardcoded owner identity.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use itqan_auth::jwt::encoder::{AccessToken, JwtEncoder};
use itqan_auth::password::{PasswordHasher, PasswordValidator};
use itqan_core::error::AppError;
use itqan_core::result::AppResult;
use itqan_database::repositories::user::UserRepository;
use itqan_entity::user::model::{CreateUser, UpdateProfile, User};
use itqan_entity::user::role::UserRole;
use itqan_storage::manager::StorageManager;

use crate::context::RequestContext;
use crate::media::validate_image;

/// Result of a successful signup or login.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The account.
    pub user: User,
    /// The issued access token.
    pub token: AccessToken,
}

/// Manages accounts and profiles.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy validator.
    validator: PasswordValidator,
    /// JWT encoder.
    encoder: Arc<JwtEncoder>,
    /// Media storage for profile/cover images.
    storage: Arc<StorageManager>,
    /// Email auto-promoted to ADMIN at signup.
    super_admin_email: String,
    /// Profile image size ceiling in bytes.
    max_image_size_bytes: u64,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: PasswordValidator,
        encoder: Arc<JwtEncoder>,
        storage: Arc<StorageManager>,
        super_admin_email: String,
        max_image_size_bytes: u64,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
            storage,
            super_admin_email,
            max_image_size_bytes,
        }
    }

    /// Registers a new account.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthenticatedUser> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if email.trim().is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        self.validator.validate(password)?;

        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let role = if !self.super_admin_email.is_empty()
            && email.eq_ignore_ascii_case(&self.super_admin_email)
        {
            UserRole::Admin
        } else {
            UserRole::Student
        };

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name: name.trim().to_string(),
                email: email.trim().to_lowercase(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User signed up");

        let token = self.encoder.generate_access_token(&user)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Authenticates an account by email, password, and expected role.
    ///
    /// The role check mirrors the two separate login surfaces: a student
    /// cannot log into the admin tooling and vice versa.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<AuthenticatedUser> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let user = self
            .user_repo
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }

        if user.role != role {
            return Err(AppError::authentication("Unauthorized role"));
        }

        info!(user_id = %user.id, "User logged in");

        let token = self.encoder.generate_access_token(&user)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Fetches the current user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's display name.
    pub async fn update_profile(&self, ctx: &RequestContext, name: Option<String>) -> AppResult<User> {
        if let Some(name) = &name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }

        self.user_repo
            .update_profile(&UpdateProfile {
                id: ctx.user_id,
                name,
                profile_image: None,
                cover_image: None,
            })
            .await
    }

    /// Uploads a profile image and stores its public URL.
    pub async fn upload_profile_image(
        &self,
        ctx: &RequestContext,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<User> {
        self.upload_image(ctx, content_type, data, ImageSlot::Profile)
            .await
    }

    /// Uploads a cover image and stores its public URL.
    pub async fn upload_cover_image(
        &self,
        ctx: &RequestContext,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<User> {
        self.upload_image(ctx, content_type, data, ImageSlot::Cover)
            .await
    }

    async fn upload_image(
        &self,
        ctx: &RequestContext,
        content_type: &str,
        data: Bytes,
        slot: ImageSlot,
    ) -> AppResult<User> {
        let extension = validate_image(
            content_type,
            &data,
            self.max_image_size_bytes,
            slot.label(),
        )?;

        let url = self
            .storage
            .put_media(slot.category(), ctx.user_id, extension, content_type, data)
            .await?;

        let (profile_image, cover_image) = match slot {
            ImageSlot::Profile => (Some(url), None),
            ImageSlot::Cover => (None, Some(url)),
        };

        self.user_repo
            .update_profile(&UpdateProfile {
                id: ctx.user_id,
                name: None,
                profile_image,
                cover_image,
            })
            .await
    }

    /// Lists all users (admin directory view).
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: itqan_core::types::pagination::PageRequest,
    ) -> AppResult<itqan_core::types::pagination::PageResponse<User>> {
        ctx.require_admin()?;
        self.user_repo.find_all(&page).await
    }
}

/// Which profile image slot an upload targets.
#[derive(Debug, Clone, Copy)]
enum ImageSlot {
    Profile,
    Cover,
}

impl ImageSlot {
    fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile image",
            Self::Cover => "Cover image",
        }
    }

    fn category(self) -> &'static str {
        match self {
            Self::Profile => "avatars",
            Self::Cover => "covers",
        }
    }
}
