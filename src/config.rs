// src/config.rs
use crate::domain::cache::{CacheRegion, CacheTtls};
use std::{env, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: Option<String>,
    redis_url: Option<String>,
    listen_addr: String,
    cache_ttls: CacheTtls,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

const fn ttl_variable(region: CacheRegion) -> &'static str {
    match region {
        CacheRegion::Projects => "CACHE_TTL_PROJECTS_MINUTES",
        CacheRegion::Tasks => "CACHE_TTL_TASKS_MINUTES",
        CacheRegion::TaskStats => "CACHE_TTL_TASK_STATS_MINUTES",
        CacheRegion::TaskSummaries => "CACHE_TTL_TASK_SUMMARIES_MINUTES",
        CacheRegion::Developers => "CACHE_TTL_DEVELOPERS_MINUTES",
    }
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates the rest.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = non_empty("DATABASE_URL");
        let redis_url = non_empty("REDIS_URL");
        let listen_addr = non_empty("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let mut cache_ttls = CacheTtls::default();
        for region in CacheRegion::ALL {
            let key = ttl_variable(region);
            if let Some(raw) = non_empty(key) {
                let minutes = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|minutes| *minutes > 0)
                    .ok_or_else(|| {
                        ConfigError::Invalid(format!("{key} must be a positive number of minutes"))
                    })?;
                cache_ttls = cache_ttls.with(region, Duration::from_secs(minutes.saturating_mul(60)));
            }
        }

        Ok(Self {
            database_url,
            redis_url,
            listen_addr,
            cache_ttls,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref()
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn cache_ttls(&self) -> &CacheTtls {
        &self.cache_ttls
    }
}
