// src/application/commands/mutation.rs
use std::{any::Any, sync::Arc};

use uuid::Uuid;

use crate::{
    application::{
        cache::CacheCoordinator,
        commands::audit::{AuditRecorder, RecordEventCommand},
        error::ApplicationResult,
    },
    domain::{
        audit::{ActionType, AuditEvent},
        cache::TrackedResource,
    },
};

/// A business mutation that has already been committed to its store.
pub struct CommittedMutation<'a> {
    pub resource: TrackedResource,
    pub action_type: ActionType,
    pub entity_id: Option<Uuid>,
    pub actor_name: &'a str,
    pub snapshot: Option<&'a (dyn Any + Send + Sync)>,
}

/// Single trigger point business services call after every successful
/// create, update, delete or login.
pub struct MutationHooks {
    recorder: Arc<AuditRecorder>,
    cache: Arc<CacheCoordinator>,
}

impl MutationHooks {
    pub fn new(recorder: Arc<AuditRecorder>, cache: Arc<CacheCoordinator>) -> Self {
        Self { recorder, cache }
    }

    /// Invalidate the resource's cache regions, then append the audit event.
    ///
    /// Eviction runs first and cannot fail, so an audit store outage never
    /// leaves stale cache entries behind. An audit failure is returned to
    /// the caller but the committed mutation stays in place.
    pub async fn after_commit(
        &self,
        mutation: CommittedMutation<'_>,
    ) -> ApplicationResult<AuditEvent> {
        self.cache.on_mutation(mutation.resource).await;

        self.recorder
            .record_event(RecordEventCommand {
                action_type: mutation.action_type,
                entity_type: mutation.resource.entity_type(),
                entity_id: mutation.entity_id,
                actor_name: mutation.actor_name,
                snapshot: mutation.snapshot,
            })
            .await
    }
}
