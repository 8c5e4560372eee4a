//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use itqan_core::config::cache::MemoryCacheConfig;
use itqan_core::result::AppResult;
use itqan_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, String>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> AppResult<()> {
        // moka sets TTL at cache level, not per-entry in the simple API;
        // entries expire at the cache-wide time_to_live.
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        // Moka doesn't support pattern scanning, so we treat the pattern
        // as a prefix and iterate.
        let prefix = pattern.trim_end_matches('*');
        let mut count = 0u64;

        let keys_to_remove: Vec<String> = self
            .cache
            .iter()
            .filter(|entry| entry.0.starts_with(prefix))
            .map(|entry| entry.0.to_string())
            .collect();

        for key in keys_to_remove {
            self.cache.remove(&key).await;
            count += 1;
        }

        debug!(pattern, count, "Deleted keys matching pattern");
        Ok(count)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 60,
        };
        MemoryCacheProvider::new(&config, 60)
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider.set_default("k1", "v1").await.unwrap();
        assert_eq!(provider.get("k1").await.unwrap(), Some("v1".to_string()));
        assert_eq!(provider.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider.set_default("k1", "v1").await.unwrap();
        provider.delete("k1").await.unwrap();
        assert_eq!(provider.get("k1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_pattern() {
        let provider = make_provider();
        provider.set_default("itqan:ledger:a", "1").await.unwrap();
        provider.set_default("itqan:ledger:b", "2").await.unwrap();
        provider.set_default("itqan:courses:all", "3").await.unwrap();
        // moka applies writes asynchronously; sync before iterating
        provider.cache.run_pending_tasks().await;

        let removed = provider.delete_pattern("itqan:ledger:*").await.unwrap();
        assert_eq!(removed, 2);
        assert!(provider.get("itqan:courses:all").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_exists_and_flush_all() {
        let provider = make_provider();
        provider.set_default("k1", "v1").await.unwrap();
        assert!(provider.exists("k1").await.unwrap());

        provider.flush_all().await.unwrap();
        provider.cache.run_pending_tasks().await;
        assert!(!provider.exists("k1").await.unwrap());
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let provider = make_provider();
        let value = vec!["a".to_string(), "b".to_string()];
        provider
            .set_json("k", &value, Duration::from_secs(60))
            .await
            .unwrap();
        let parsed: Vec<String> = provider.get_json("k").await.unwrap().unwrap();
        assert_eq!(parsed, value);
    }
}
