// src/domain/cache/mod.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::{collections::BTreeMap, fmt, str::FromStr, time::Duration};

/// TTL applied to regions without an explicit entry.
pub const DEFAULT_REGION_TTL: Duration = Duration::from_secs(30 * 60);

/// A named partition of the read cache, one per resource type or derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheRegion {
    Projects,
    Tasks,
    TaskStats,
    TaskSummaries,
    Developers,
}

impl CacheRegion {
    pub const ALL: [Self; 5] = [
        Self::Projects,
        Self::Tasks,
        Self::TaskStats,
        Self::TaskSummaries,
        Self::Developers,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::TaskStats => "taskStats",
            Self::TaskSummaries => "taskSummaries",
            Self::Developers => "developers",
        }
    }

    /// Glob matching every rendered key in this region.
    pub fn key_pattern(self) -> String {
        format!("{}::*", self.as_str())
    }
}

impl fmt::Display for CacheRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheRegion {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == value)
            .ok_or_else(|| DomainError::Validation(format!("unknown cache region '{value}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub region: CacheRegion,
    pub signature: String,
}

impl CacheKey {
    pub fn new(region: CacheRegion, signature: impl Into<String>) -> Self {
        Self {
            region,
            signature: signature.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.region.as_str(), self.signature)
    }
}

/// Per-region time-to-live. Built once at startup and never mutated
/// afterwards; expiry backs up eviction in case an invalidation is missed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheTtls {
    ttls: BTreeMap<CacheRegion, Duration>,
}

impl CacheTtls {
    pub fn ttl(&self, region: CacheRegion) -> Duration {
        self.ttls.get(&region).copied().unwrap_or(DEFAULT_REGION_TTL)
    }

    #[must_use]
    pub fn with(mut self, region: CacheRegion, ttl: Duration) -> Self {
        self.ttls.insert(region, ttl);
        self
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        const MINUTE: u64 = 60;
        let ttls = BTreeMap::from([
            (CacheRegion::Projects, Duration::from_secs(60 * MINUTE)),
            (CacheRegion::Tasks, Duration::from_secs(30 * MINUTE)),
            (CacheRegion::TaskStats, Duration::from_secs(15 * MINUTE)),
            (CacheRegion::Developers, Duration::from_secs(60 * MINUTE)),
        ]);
        Self { ttls }
    }
}

/// Business resources whose mutations are audited and invalidate caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedResource {
    Project,
    Task,
    Developer,
    User,
}

impl TrackedResource {
    /// Label recorded as the audit event's entity type.
    pub const fn entity_type(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Task => "Task",
            Self::Developer => "Developer",
            Self::User => "USER",
        }
    }

    /// Every region whose content derives from this resource.
    pub const fn regions(self) -> &'static [CacheRegion] {
        match self {
            Self::Project => &[CacheRegion::Projects],
            Self::Task => &[
                CacheRegion::Tasks,
                CacheRegion::TaskStats,
                CacheRegion::TaskSummaries,
            ],
            Self::Developer => &[CacheRegion::Developers],
            Self::User => &[],
        }
    }
}
