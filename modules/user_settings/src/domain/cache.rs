//! Cache port for user setting snapshots
//!
//! Implementations are in infra/cache

use async_trait::async_trait;
use std::time::Duration;

/// Cache adapter failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Key is absent or expired
    #[error("cache key not found")]
    NotFound,
    /// Any other backend failure
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Key-value store with expiry, holding serialized snapshots
#[async_trait]
pub trait SettingsCache: Send + Sync {
    /// Fetch the value under `key`; `CacheError::NotFound` when absent
    async fn get(&self, key: &str) -> Result<String, CacheError>;

    /// Store `value` under `key`, expiring after `ttl`
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration)
        -> Result<(), CacheError>;

    /// Remove `key`; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
