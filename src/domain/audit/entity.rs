// src/domain/audit/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

/// Ordered snapshot of an entity captured when an action was audited.
pub type Payload = Map<String, Value>;

/// Reserved payload key holding the captured type name.
pub const ENTITY_CLASS_KEY: &str = "_entityClass";
/// Reserved payload key holding the capture instant.
pub const CAPTURE_TIME_KEY: &str = "_captureTime";
/// Reserved payload key present only on degraded snapshots.
pub const ERROR_KEY: &str = "_error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Create,
    Update,
    Delete,
    LoginSuccess,
}

impl ActionType {
    pub const ALL: [Self; 4] = [Self::Create, Self::Update, Self::Delete, Self::LoginSuccess];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::LoginSuccess => "LOGIN_SUCCESS",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "unsupported action type '{value}', expected one of CREATE, UPDATE, DELETE, LOGIN_SUCCESS"
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEventId(Uuid);

impl AuditEventId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AuditEventId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<AuditEventId> for Uuid {
    fn from(value: AuditEventId) -> Self {
        value.0
    }
}

impl fmt::Display for AuditEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AuditEventId {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| DomainError::Validation(format!("invalid audit event id '{value}'")))
    }
}

/// An event that has been stamped by the recorder but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEvent {
    pub action_type: ActionType,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub actor_name: String,
    pub timestamp: DateTime<Utc>,
    pub payload: Payload,
}

impl NewAuditEvent {
    pub fn into_event(self, id: AuditEventId) -> AuditEvent {
        AuditEvent {
            id,
            action_type: self.action_type,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            actor_name: self.actor_name,
            timestamp: self.timestamp,
            payload: self.payload,
        }
    }
}

/// One stored audit record. Stores only ever append these; nothing
/// in the crate offers a way to modify one after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    pub id: AuditEventId,
    pub action_type: ActionType,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub actor_name: String,
    pub timestamp: DateTime<Utc>,
    pub payload: Payload,
}
