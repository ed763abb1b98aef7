// src/domain/audit/repository.rs
use super::{
    entity::{ActionType, AuditEvent, AuditEventId, NewAuditEvent},
    page::{Page, PageRequest},
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Append-only store of audit events.
///
/// There is intentionally no update or delete method; events are written
/// once and read many times.
#[async_trait]
pub trait AuditEventRepository: Send + Sync {
    /// Store the event and return it with its store-assigned id.
    async fn append(&self, event: NewAuditEvent) -> DomainResult<AuditEvent>;

    async fn find_by_id(&self, id: AuditEventId) -> DomainResult<Option<AuditEvent>>;

    async fn find_by_entity(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>>;

    /// Always ordered by timestamp descending; the requested sort only
    /// breaks ties.
    async fn find_by_actor(
        &self,
        actor_name: &str,
        request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>>;

    /// Unpaginated; callers window the result themselves.
    async fn find_by_action_type(&self, action_type: ActionType) -> DomainResult<Vec<AuditEvent>>;

    /// Unpaginated; both bounds are exclusive.
    async fn find_by_timestamp_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<AuditEvent>>;

    async fn find_recent(&self, request: &PageRequest) -> DomainResult<Page<AuditEvent>>;

    async fn count_by_action_type(&self, action_type: ActionType) -> DomainResult<u64>;

    async fn count_by_entity_type(&self, entity_type: &str) -> DomainResult<u64>;

    async fn count_by_actor(&self, actor_name: &str) -> DomainResult<u64>;
}
