// src/infrastructure/repositories/memory_audit_event.rs
use crate::domain::audit::{
    ActionType, AuditEvent, AuditEventId, AuditEventRepository, NewAuditEvent, Page, PageRequest,
    window,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local audit store, used when no database is configured and in
/// tests. Events live in insertion order.
#[derive(Default)]
pub struct InMemoryAuditEventRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    async fn select(&self, predicate: impl Fn(&AuditEvent) -> bool) -> Vec<AuditEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| predicate(event))
            .cloned()
            .collect()
    }
}

fn sorted_page(mut events: Vec<AuditEvent>, request: &PageRequest) -> Page<AuditEvent> {
    let sort = request.sort();
    events.sort_by(|a, b| sort.compare(a, b));
    window(events, request)
}

#[async_trait]
impl AuditEventRepository for InMemoryAuditEventRepository {
    async fn append(&self, event: NewAuditEvent) -> DomainResult<AuditEvent> {
        let stored = event.into_event(AuditEventId::generate());
        self.events.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: AuditEventId) -> DomainResult<Option<AuditEvent>> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .find(|event| event.id == id)
            .cloned())
    }

    async fn find_by_entity(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>> {
        let events = self
            .select(|event| event.entity_type == entity_type && event.entity_id == Some(entity_id))
            .await;
        Ok(sorted_page(events, request))
    }

    async fn find_by_actor(
        &self,
        actor_name: &str,
        request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>> {
        let mut events = self.select(|event| event.actor_name == actor_name).await;
        let sort = request.sort();
        events.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| sort.compare(a, b))
        });
        Ok(window(events, request))
    }

    async fn find_by_action_type(&self, action_type: ActionType) -> DomainResult<Vec<AuditEvent>> {
        let mut events = self.select(|event| event.action_type == action_type).await;
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(events)
    }

    async fn find_by_timestamp_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<AuditEvent>> {
        let mut events = self
            .select(|event| event.timestamp > start && event.timestamp < end)
            .await;
        events.sort_by_key(|event| event.timestamp);
        Ok(events)
    }

    async fn find_recent(&self, request: &PageRequest) -> DomainResult<Page<AuditEvent>> {
        let events = self.events.read().await.clone();
        Ok(sorted_page(events, request))
    }

    async fn count_by_action_type(&self, action_type: ActionType) -> DomainResult<u64> {
        Ok(self.select(|event| event.action_type == action_type).await.len() as u64)
    }

    async fn count_by_entity_type(&self, entity_type: &str) -> DomainResult<u64> {
        Ok(self.select(|event| event.entity_type == entity_type).await.len() as u64)
    }

    async fn count_by_actor(&self, actor_name: &str) -> DomainResult<u64> {
        Ok(self.select(|event| event.actor_name == actor_name).await.len() as u64)
    }
}
