//! In-process expiring cache backed by moka

use crate::domain::cache::{CacheError, SettingsCache};
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

/// Default bound on the number of cached snapshots
const DEFAULT_MAX_ENTRIES: u64 = 100_000;

/// Longest TTL accepted for a single entry
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Expires every entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, (String, Duration)> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &(String, Duration),
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.1)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &(String, Duration),
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.1)
    }
}

/// Expiring key-value cache held in process memory
#[derive(Clone)]
pub struct InMemorySettingsCache {
    entries: Cache<String, (String, Duration)>,
}

impl Default for InMemorySettingsCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }
}

impl InMemorySettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `max_entries` snapshots
    pub fn with_capacity(max_entries: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_entries)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }

    /// Number of live entries once pending evictions have run
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

#[async_trait]
impl SettingsCache for InMemorySettingsCache {
    async fn get(&self, key: &str) -> Result<String, CacheError> {
        self.entries
            .get(key)
            .await
            .map(|(value, _)| value)
            .ok_or(CacheError::NotFound)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        if ttl > MAX_TTL {
            return Err(CacheError::Backend(format!(
                "ttl of {ttl:?} exceeds the maximum of {MAX_TTL:?}"
            )));
        }
        self.entries
            .insert(key.to_string(), (value.to_string(), ttl))
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.invalidate(key).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_is_not_found() {
        let cache = InMemorySettingsCache::new();
        assert_eq!(cache.get("nope").await, Err(CacheError::NotFound));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = InMemorySettingsCache::new();
        cache
            .set_with_expiry("k", "v", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get("k").await.unwrap(), "v");
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_and_tolerates_absent_key() {
        let cache = InMemorySettingsCache::new();
        cache
            .set_with_expiry("k", "v", Duration::from_secs(60))
            .await
            .unwrap();

        cache.delete("k").await.unwrap();
        cache.delete("k").await.unwrap();

        assert_eq!(cache.get("k").await, Err(CacheError::NotFound));
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_entry_expires_after_its_own_ttl() {
        let cache = InMemorySettingsCache::new();
        cache
            .set_with_expiry("short", "v", Duration::from_millis(50))
            .await
            .unwrap();
        cache
            .set_with_expiry("long", "v", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get("short").await, Err(CacheError::NotFound));
        assert_eq!(cache.get("long").await.unwrap(), "v");
    }

    #[tokio::test]
    async fn test_overwrite_resets_expiry() {
        let cache = InMemorySettingsCache::new();
        cache
            .set_with_expiry("k", "old", Duration::from_millis(50))
            .await
            .unwrap();
        cache
            .set_with_expiry("k", "new", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get("k").await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_rejects_ttl_beyond_maximum() {
        let cache = InMemorySettingsCache::new();

        let result = cache
            .set_with_expiry("k", "v", MAX_TTL + Duration::from_secs(1))
            .await;

        assert!(matches!(result, Err(CacheError::Backend(_))));
        assert_eq!(cache.get("k").await, Err(CacheError::NotFound));
    }
}
