mod memory_cache_store;
mod redis_cache_store;

pub use memory_cache_store::InMemoryCacheStore;
pub use redis_cache_store::RedisCacheStore;
