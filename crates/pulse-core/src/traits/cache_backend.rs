//! Cache backing store trait.

use crate::error::CacheStoreError;
use crate::types::CacheEntry;
use async_trait::async_trait;

/// Keyed storage behind the cache-aside layer.
///
/// Implementations only need select-by-key and upsert-by-key. Expiry is
/// decided by the caller, so expired rows are returned as-is.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Read the entry stored under `key`, if any.
    async fn select(&self, key: &str) -> Result<Option<CacheEntry>, CacheStoreError>;

    /// Insert or overwrite the entry under its key.
    async fn upsert(&self, entry: CacheEntry) -> Result<(), CacheStoreError>;

    /// Get the backend name.
    fn name(&self) -> &str;
}
