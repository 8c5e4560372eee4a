//! Capped, most-recent-first notification ledgers.
//!
//! Two independent ledgers exist per student: a personal one keyed by
//! user id (written by the approval/cancellation flow) and a global one
//! written by several flows indiscriminately. Entries are appended to
//! the front and the list is truncated to the newest 50 after every
//! insertion; entries are never mutated in place except by the bulk
//! mark-all-read operation.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use itqan_cache::keys;
use itqan_cache::provider::CacheManager;
use itqan_core::result::AppResult;
use itqan_core::traits::cache::CacheProvider;
use itqan_entity::notification::{LedgerEntry, NotificationLevel};

/// Maximum entries retained per ledger.
pub const LEDGER_CAP: usize = 50;

/// Cache-backed notification ledger store.
#[derive(Debug, Clone)]
pub struct NotificationLedger {
    /// Backing cache manager.
    cache: Arc<CacheManager>,
}

impl NotificationLedger {
    /// Creates a ledger store over the given cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Appends an entry to a user's personal ledger.
    pub async fn append_personal(
        &self,
        user_id: Uuid,
        message: impl Into<String>,
        level: NotificationLevel,
    ) -> AppResult<LedgerEntry> {
        self.append(&keys::personal_ledger(user_id), message, level)
            .await
    }

    /// Appends an entry to the global ledger.
    pub async fn append_global(
        &self,
        message: impl Into<String>,
        level: NotificationLevel,
    ) -> AppResult<LedgerEntry> {
        self.append(&keys::global_ledger(), message, level).await
    }

    /// Reads a user's personal ledger, newest first.
    pub async fn personal(&self, user_id: Uuid) -> AppResult<Vec<LedgerEntry>> {
        self.read(&keys::personal_ledger(user_id)).await
    }

    /// Reads the global ledger, newest first.
    pub async fn global(&self) -> AppResult<Vec<LedgerEntry>> {
        self.read(&keys::global_ledger()).await
    }

    /// Merges a user's personal ledger with the global one, newest first.
    ///
    /// This is what "my notifications" renders.
    pub async fn merged(&self, user_id: Uuid) -> AppResult<Vec<LedgerEntry>> {
        let mut entries = self.personal(user_id).await?;
        entries.extend(self.global().await?);
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Marks every entry read in both of a user's ledgers.
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()> {
        for key in [keys::personal_ledger(user_id), keys::global_ledger()] {
            let mut entries = self.read(&key).await?;
            for entry in &mut entries {
                entry.read = true;
            }
            self.cache.set_default(&key, &serde_json::to_string(&entries)?).await?;
        }
        Ok(())
    }

    /// Replaces a user's personal ledger with the empty list.
    pub async fn clear_personal(&self, user_id: Uuid) -> AppResult<()> {
        self.cache.delete(&keys::personal_ledger(user_id)).await
    }

    /// Replaces the global ledger with the empty list.
    pub async fn clear_global(&self) -> AppResult<()> {
        self.cache.delete(&keys::global_ledger()).await
    }

    async fn append(
        &self,
        key: &str,
        message: impl Into<String>,
        level: NotificationLevel,
    ) -> AppResult<LedgerEntry> {
        let entry = LedgerEntry::new(message, level);

        let mut entries = self.read(key).await?;
        entries.insert(0, entry.clone());
        entries.truncate(LEDGER_CAP);

        self.cache
            .set_default(key, &serde_json::to_string(&entries)?)
            .await?;

        debug!(key, len = entries.len(), "Ledger entry appended");
        Ok(entry)
    }

    async fn read(&self, key: &str) -> AppResult<Vec<LedgerEntry>> {
        Ok(self.cache.get_json(key).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itqan_cache::memory::MemoryCacheProvider;
    use itqan_core::config::cache::MemoryCacheConfig;

    fn make_ledger() -> NotificationLedger {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 3600,
        };
        let provider = MemoryCacheProvider::new(&config, 3600);
        NotificationLedger::new(Arc::new(CacheManager::from_provider(Arc::new(provider))))
    }

    #[tokio::test]
    async fn test_append_is_newest_first() {
        let ledger = make_ledger();
        let user = Uuid::new_v4();

        ledger
            .append_personal(user, "first", NotificationLevel::Info)
            .await
            .unwrap();
        ledger
            .append_personal(user, "second", NotificationLevel::Success)
            .await
            .unwrap();

        let entries = ledger.personal(user).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "second");
        assert_eq!(entries[1].message, "first");
    }

    #[tokio::test]
    async fn test_cap_drops_oldest_beyond_fifty() {
        let ledger = make_ledger();
        let user = Uuid::new_v4();

        for i in 0..60 {
            ledger
                .append_personal(user, format!("msg {i}"), NotificationLevel::Info)
                .await
                .unwrap();
        }

        let entries = ledger.personal(user).await.unwrap();
        assert_eq!(entries.len(), LEDGER_CAP);
        assert_eq!(entries[0].message, "msg 59");
        assert_eq!(entries[LEDGER_CAP - 1].message, "msg 10");
    }

    #[tokio::test]
    async fn test_merged_combines_and_sorts() {
        let ledger = make_ledger();
        let user = Uuid::new_v4();

        ledger
            .append_personal(user, "personal", NotificationLevel::Warning)
            .await
            .unwrap();
        ledger
            .append_global("global", NotificationLevel::Info)
            .await
            .unwrap();

        let merged = ledger.merged(user).await.unwrap();
        assert_eq!(merged.len(), 2);
        // Newest first across both tiers.
        assert!(merged[0].timestamp >= merged[1].timestamp);
    }

    #[tokio::test]
    async fn test_mark_all_read() {
        let ledger = make_ledger();
        let user = Uuid::new_v4();

        ledger
            .append_personal(user, "a", NotificationLevel::Info)
            .await
            .unwrap();
        ledger
            .append_global("b", NotificationLevel::Info)
            .await
            .unwrap();

        ledger.mark_all_read(user).await.unwrap();

        assert!(ledger.merged(user).await.unwrap().iter().all(|e| e.read));
    }

    #[tokio::test]
    async fn test_clear_replaces_with_empty() {
        let ledger = make_ledger();
        let user = Uuid::new_v4();

        ledger
            .append_personal(user, "a", NotificationLevel::Info)
            .await
            .unwrap();
        ledger.clear_personal(user).await.unwrap();
        assert!(ledger.personal(user).await.unwrap().is_empty());

        ledger
            .append_global("b", NotificationLevel::Info)
            .await
            .unwrap();
        ledger.clear_global().await.unwrap();
        assert!(ledger.global().await.unwrap().is_empty());
    }
}
