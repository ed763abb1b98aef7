// src/infrastructure/cache/redis_cache_store.rs
use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::cache::CacheStore;
use crate::domain::cache::{CacheKey, CacheRegion};
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

const SCAN_BATCH: usize = 200;

#[derive(Clone)]
pub struct RedisCacheStore {
    pool: Pool,
}

impl RedisCacheStore {
    /// Create a new Redis backed cache from a redis URL (e.g. redis://:password@host:6379/0)
    pub fn from_url(url: &str) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn connection(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &CacheKey) -> ApplicationResult<Option<String>> {
        let mut conn = self.connection().await?;
        let val: Option<String> = conn
            .get(key.to_string())
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(val)
    }

    async fn put(&self, key: &CacheKey, value: String, ttl: Duration) -> ApplicationResult<()> {
        let mut conn = self.connection().await?;
        // SET EX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key.to_string(), value, seconds)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }

    async fn evict_region(&self, region: CacheRegion) -> ApplicationResult<()> {
        let mut conn = self.connection().await?;
        let pattern = region.key_pattern();
        let mut cursor: u64 = 0;
        let mut evicted = 0usize;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

            if !keys.is_empty() {
                evicted += keys.len();
                conn.del::<_, ()>(keys)
                    .await
                    .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        tracing::debug!(region = %region, evicted, "evicted cache region");
        Ok(())
    }
}
