//! Notification fan-out across the durable and ephemeral tiers.

use std::sync::Arc;

use tracing::warn;

use itqan_core::error::AppError;
use itqan_core::result::AppResult;
use itqan_database::repositories::notification::NotificationRepository;
use itqan_database::repositories::user::UserRepository;
use itqan_entity::notification::{LedgerEntry, Notification, NotificationLevel};
use itqan_entity::user::UserRole;

use crate::context::RequestContext;

use super::ledger::NotificationLedger;

/// Manages both notification tiers: the durable per-user table and the
/// capped ephemeral ledgers.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Durable notification repository.
    notif_repo: Arc<NotificationRepository>,
    /// User repository (for admin fan-out).
    user_repo: Arc<UserRepository>,
    /// Ephemeral ledger store.
    ledger: NotificationLedger,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notif_repo: Arc<NotificationRepository>,
        user_repo: Arc<UserRepository>,
        ledger: NotificationLedger,
    ) -> Self {
        Self {
            notif_repo,
            user_repo,
            ledger,
        }
    }

    /// The underlying ephemeral ledger store.
    pub fn ledger(&self) -> &NotificationLedger {
        &self.ledger
    }

    /// Fans a message out to every admin: one durable row per admin plus
    /// one entry on the global ledger.
    ///
    /// Best-effort per recipient — a failed row is logged and skipped so
    /// one broken admin account cannot block the workflow.
    pub async fn notify_admins(&self, message: &str) -> AppResult<()> {
        let admins = self.user_repo.find_by_role(UserRole::Admin).await?;
        for admin in &admins {
            if let Err(e) = self.notif_repo.create(admin.id, message).await {
                warn!(admin_id = %admin.id, error = %e, "Failed to notify admin");
            }
        }

        self.ledger
            .append_global(message, NotificationLevel::Info)
            .await?;
        Ok(())
    }

    /// Lists the current user's durable notifications, newest first.
    pub async fn list(&self, ctx: &RequestContext, limit: i64) -> AppResult<Vec<Notification>> {
        self.notif_repo.find_by_user(ctx.user_id, limit).await
    }

    /// Reads the current user's merged ephemeral ledgers, newest first.
    pub async fn ledger_entries(&self, ctx: &RequestContext) -> AppResult<Vec<LedgerEntry>> {
        self.ledger.merged(ctx.user_id).await
    }

    /// Counts unread durable notifications for the current user.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.notif_repo.count_unread(ctx.user_id).await
    }

    /// Marks everything read in both tiers for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let updated = self.notif_repo.mark_all_read(ctx.user_id).await?;
        self.ledger.mark_all_read(ctx.user_id).await?;
        Ok(updated)
    }

    /// Clears the current user's ledgers and durable notifications.
    pub async fn clear(&self, ctx: &RequestContext) -> AppResult<()> {
        self.notif_repo
            .clear_for_user(ctx.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Failed to clear notifications: {e}")))?;
        self.ledger.clear_personal(ctx.user_id).await?;
        Ok(())
    }
}
