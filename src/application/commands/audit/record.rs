// src/application/commands/audit/record.rs
use std::any::Any;

use uuid::Uuid;

use super::AuditRecorder;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::audit::{ActionType, AuditEvent, NewAuditEvent},
};

pub struct RecordEventCommand<'a> {
    pub action_type: ActionType,
    pub entity_type: &'a str,
    pub entity_id: Option<Uuid>,
    pub actor_name: &'a str,
    /// Entity state at action time; `None` stores an empty payload.
    pub snapshot: Option<&'a (dyn Any + Send + Sync)>,
}

impl AuditRecorder {
    /// Append one audit event describing a completed business action.
    ///
    /// Failures are reported as [`ApplicationError::Audit`]. Nothing is
    /// retried and the triggering mutation is left in place.
    pub async fn record_event(
        &self,
        command: RecordEventCommand<'_>,
    ) -> ApplicationResult<AuditEvent> {
        let RecordEventCommand {
            action_type,
            entity_type,
            entity_id,
            actor_name,
            snapshot,
        } = command;

        let payload = self
            .serializer
            .serialize(entity_type, snapshot.map(|entity| entity as &dyn Any));
        let event = NewAuditEvent {
            action_type,
            entity_type: entity_type.to_string(),
            entity_id,
            actor_name: actor_name.to_string(),
            timestamp: self.next_timestamp(),
            payload,
        };

        match self.repo.append(event).await {
            Ok(stored) => {
                tracing::info!(
                    audit_id = %stored.id,
                    action = %action_type,
                    entity_type,
                    entity_id = ?entity_id,
                    actor = actor_name,
                    "audit event recorded"
                );
                Ok(stored)
            }
            Err(err) => {
                tracing::error!(
                    action = %action_type,
                    entity_type,
                    entity_id = ?entity_id,
                    actor = actor_name,
                    error = %err,
                    "failed to record audit event"
                );
                Err(ApplicationError::audit("failed to create audit log", err))
            }
        }
    }
}
