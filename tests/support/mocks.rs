// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use project_tracker::application::{
    ApplicationResult, error::ApplicationError, ports::cache::CacheStore, ports::time::Clock,
};
use project_tracker::domain::audit::{
    ActionType, AuditEvent, AuditEventId, AuditEventRepository, NewAuditEvent, Page, PageRequest,
};
use project_tracker::domain::cache::{CacheKey, CacheRegion};
use project_tracker::domain::errors::{DomainError, DomainResult};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};
use uuid::Uuid;

/// Deterministic timestamp used across the suite.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks.rs")
        .with_timezone(&Utc)
}

/// Clock frozen at one instant until moved with [`ManualClock::advance`].
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(fixed_now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

fn unavailable() -> DomainError {
    DomainError::Persistence("audit store unavailable".into())
}

/// Audit store that rejects every call.
pub struct FailingAuditRepo;

#[async_trait]
impl AuditEventRepository for FailingAuditRepo {
    async fn append(&self, _event: NewAuditEvent) -> DomainResult<AuditEvent> {
        Err(unavailable())
    }
    async fn find_by_id(&self, _id: AuditEventId) -> DomainResult<Option<AuditEvent>> {
        Err(unavailable())
    }
    async fn find_by_entity(
        &self,
        _entity_type: &str,
        _entity_id: Uuid,
        _request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>> {
        Err(unavailable())
    }
    async fn find_by_actor(
        &self,
        _actor_name: &str,
        _request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>> {
        Err(unavailable())
    }
    async fn find_by_action_type(&self, _action_type: ActionType) -> DomainResult<Vec<AuditEvent>> {
        Err(unavailable())
    }
    async fn find_by_timestamp_between(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> DomainResult<Vec<AuditEvent>> {
        Err(unavailable())
    }
    async fn find_recent(&self, _request: &PageRequest) -> DomainResult<Page<AuditEvent>> {
        Err(unavailable())
    }
    async fn count_by_action_type(&self, _action_type: ActionType) -> DomainResult<u64> {
        Err(unavailable())
    }
    async fn count_by_entity_type(&self, _entity_type: &str) -> DomainResult<u64> {
        Err(unavailable())
    }
    async fn count_by_actor(&self, _actor_name: &str) -> DomainResult<u64> {
        Err(unavailable())
    }
}

/// Cache store that fails every operation and counts the attempts.
#[derive(Default)]
pub struct FailingCacheStore {
    pub calls: AtomicUsize,
}

impl FailingCacheStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> ApplicationResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ApplicationError::infrastructure("cache unreachable"))
    }
}

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn get(&self, _key: &CacheKey) -> ApplicationResult<Option<String>> {
        self.fail()
    }
    async fn put(
        &self,
        _key: &CacheKey,
        _value: String,
        _ttl: std::time::Duration,
    ) -> ApplicationResult<()> {
        self.fail()
    }
    async fn evict_region(&self, _region: CacheRegion) -> ApplicationResult<()> {
        self.fail()
    }
}
