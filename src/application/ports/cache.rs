// src/application/ports/cache.rs
use crate::application::ApplicationResult;
use crate::domain::cache::{CacheKey, CacheRegion};
use async_trait::async_trait;
use std::time::Duration;

/// Key/value store backing the read cache. Values are opaque serialized
/// strings; interpretation belongs to the coordinator.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &CacheKey) -> ApplicationResult<Option<String>>;

    async fn put(&self, key: &CacheKey, value: String, ttl: Duration) -> ApplicationResult<()>;

    /// Drop every entry of the region. Evicting an empty or unknown region
    /// succeeds without doing anything.
    async fn evict_region(&self, region: CacheRegion) -> ApplicationResult<()>;
}
