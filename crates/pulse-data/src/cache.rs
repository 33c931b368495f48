//! Cache-aside layer and the in-memory backend.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pulse_core::error::{CacheStoreError, PulseResult};
use pulse_core::traits::CacheBackend;
use pulse_core::types::{CacheEntry, CacheStatus};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Key and freshness window for one cached payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    pub key: String,
    pub ttl: Duration,
}

impl CachePolicy {
    pub fn new(key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            ttl,
        }
    }
}

/// A payload together with where it came from.
#[derive(Debug, Clone)]
pub struct Cached<T> {
    pub payload: T,
    pub status: CacheStatus,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Serve-fresh-or-recompute wrapper over a [`CacheBackend`].
///
/// A fresh entry is returned without calling the producer. Otherwise the
/// producer runs and a successful result overwrites the entry. When the
/// producer fails, the stored entry is left untouched and the error is
/// returned. Concurrent misses for the same key may each run the producer.
#[derive(Clone)]
pub struct CacheAside {
    backend: Arc<dyn CacheBackend>,
}

impl CacheAside {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Return the cached payload for `policy.key`, refreshing it if stale.
    pub async fn get_or_refresh<T, F, Fut>(
        &self,
        policy: &CachePolicy,
        producer: F,
    ) -> PulseResult<Cached<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = PulseResult<T>>,
    {
        self.get_or_refresh_at(policy, Utc::now(), producer).await
    }

    /// Same as [`get_or_refresh`](Self::get_or_refresh) with an explicit clock.
    pub async fn get_or_refresh_at<T, F, Fut>(
        &self,
        policy: &CachePolicy,
        now: DateTime<Utc>,
        producer: F,
    ) -> PulseResult<Cached<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = PulseResult<T>>,
    {
        let key = policy.key.as_str();

        if let Some(entry) = self.backend.select(key).await? {
            if entry.is_fresh(now) {
                let CacheEntry {
                    payload,
                    fetched_at,
                    expires_at,
                    ..
                } = entry;
                match serde_json::from_value::<T>(payload) {
                    Ok(payload) => {
                        debug!(key, %expires_at, "Cache hit");
                        return Ok(Cached {
                            payload,
                            status: CacheStatus::Hit,
                            fetched_at,
                            expires_at,
                        });
                    }
                    Err(e) => {
                        warn!(key, error = %e, "Cached payload does not decode, refreshing");
                    }
                }
            }
        }

        info!(key, backend = self.backend.name(), "Cache miss, refreshing");
        let payload = producer().await?;

        let entry = CacheEntry::new(key, serde_json::to_value(&payload)?, now, policy.ttl);
        let (fetched_at, expires_at) = (entry.fetched_at, entry.expires_at);
        self.backend.upsert(entry).await?;

        Ok(Cached {
            payload,
            status: CacheStatus::Miss,
            fetched_at,
            expires_at,
        })
    }

    /// Read the raw entry regardless of freshness.
    pub async fn peek(&self, key: &str) -> PulseResult<Option<CacheEntry>> {
        Ok(self.backend.select(key).await?)
    }
}

/// Process-local cache backend.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheStore {
    async fn select(&self, key: &str) -> Result<Option<CacheEntry>, CacheStoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn upsert(&self, entry: CacheEntry) -> Result<(), CacheStoreError> {
        self.entries.write().await.insert(entry.key.clone(), entry);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
