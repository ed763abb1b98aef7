// src/application/cache/mod.rs
//! Read-through cache over the authoritative stores.
//!
//! The cache is a disposable view: every store or decode failure is logged
//! and treated as a miss, so a broken cache only ever costs a recompute.
//! Invalidation is coarse. A mutation drops whole regions rather than the
//! entries derived from the mutated id.
use crate::application::{ApplicationResult, ports::cache::CacheStore};
use crate::domain::cache::{CacheKey, CacheRegion, CacheTtls, TrackedResource};
use serde::{Serialize, de::DeserializeOwned};
use std::{future::Future, sync::Arc, time::Duration};

pub struct CacheCoordinator {
    store: Arc<dyn CacheStore>,
    ttls: CacheTtls,
}

impl CacheCoordinator {
    pub fn new(store: Arc<dyn CacheStore>, ttls: CacheTtls) -> Self {
        Self { store, ttls }
    }

    pub fn ttl_for(&self, region: CacheRegion) -> Duration {
        self.ttls.ttl(region)
    }

    pub async fn get<T>(&self, region: CacheRegion, signature: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let key = CacheKey::new(region, signature);
        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %key, "cache miss");
                return None;
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(key = %key, "cache hit");
                Some(value)
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "cached value could not be decoded, treating as miss");
                None
            }
        }
    }

    pub async fn put<T>(&self, region: CacheRegion, signature: &str, value: &T, ttl: Duration)
    where
        T: Serialize + ?Sized,
    {
        let key = CacheKey::new(region, signature);
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "value could not be encoded for caching");
                return;
            }
        };

        if let Err(err) = self.store.put(&key, raw, ttl).await {
            tracing::warn!(key = %key, error = %err, "cache write failed");
        }
    }

    /// Store with the region's configured TTL.
    pub async fn put_default<T>(&self, region: CacheRegion, signature: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        self.put(region, signature, value, self.ttl_for(region)).await;
    }

    /// Drop every entry of `region`. Idempotent; never fails.
    pub async fn evict_region(&self, region: CacheRegion) {
        match self.store.evict_region(region).await {
            Ok(()) => tracing::debug!(region = %region, "cache region evicted"),
            Err(err) => {
                tracing::warn!(region = %region, error = %err, "cache region eviction failed");
            }
        }
    }

    /// Evict every region derived from `resource`.
    pub async fn on_mutation(&self, resource: TrackedResource) {
        for region in resource.regions() {
            self.evict_region(*region).await;
        }
    }

    /// Serve `signature` from `region`, or compute it with `loader` and
    /// populate the cache. Errors from the loader propagate unchanged and
    /// nothing is cached for them.
    pub async fn get_or_load<T, F, Fut>(
        &self,
        region: CacheRegion,
        signature: &str,
        loader: F,
    ) -> ApplicationResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApplicationResult<T>>,
    {
        if let Some(cached) = self.get(region, signature).await {
            return Ok(cached);
        }

        let value = loader().await?;
        self.put_default(region, signature, &value).await;
        Ok(value)
    }
}
