// src/infrastructure/cache/memory_cache_store.rs
use crate::application::ApplicationResult;
use crate::application::ports::cache::CacheStore;
use crate::domain::cache::{CacheKey, CacheRegion};
use async_trait::async_trait;
use std::{collections::HashMap, time::Duration};
use tokio::{sync::Mutex, time::Instant};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local cache with per-entry expiry. Expired entries are dropped
/// lazily on read.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<CacheKey, Entry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries in the region.
    pub async fn region_len(&self, region: CacheRegion) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .iter()
            .filter(|(key, entry)| key.region == region && entry.expires_at > now)
            .count()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> ApplicationResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &CacheKey, value: String, ttl: Duration) -> ApplicationResult<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .lock()
            .await
            .insert(key.clone(), Entry { value, expires_at });
        Ok(())
    }

    async fn evict_region(&self, region: CacheRegion) -> ApplicationResult<()> {
        self.entries.lock().await.retain(|key, _| key.region != region);
        Ok(())
    }
}
