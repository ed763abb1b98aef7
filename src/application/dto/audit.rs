// src/application/dto/audit.rs
use crate::domain::audit::{ActionType, AuditEvent, AuditEventId, Payload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DESCRIPTION_PREVIEW_CHARS: usize = 50;

pub const NO_CHANGES_SUMMARY: &str = "No changes recorded";
pub const SUMMARY_UNAVAILABLE: &str = "Changes summary unavailable";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditEventDto {
    pub id: Uuid,
    pub action_type: ActionType,
    /// Human-readable description, e.g. "Created a new project".
    pub action_description: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    /// Timestamp formatted for display, e.g. "2024-06-06 14:30:25".
    pub formatted_timestamp: String,
    pub actor_name: String,
    #[schema(value_type = Object)]
    pub payload: Payload,
    pub changes_summary: String,
}

impl From<AuditEvent> for AuditEventDto {
    fn from(event: AuditEvent) -> Self {
        let action_description = describe_action(event.action_type, &event.entity_type);
        let changes_summary = summarize_changes(event.id, &event.payload);
        Self {
            id: event.id.into(),
            action_type: event.action_type,
            action_description,
            entity_type: event.entity_type,
            entity_id: event.entity_id,
            formatted_timestamp: event.timestamp.format(DISPLAY_FORMAT).to_string(),
            timestamp: event.timestamp,
            actor_name: event.actor_name,
            payload: event.payload,
            changes_summary,
        }
    }
}

pub fn describe_action(action_type: ActionType, entity_type: &str) -> String {
    let entity = entity_type.to_lowercase();
    match action_type {
        ActionType::Create => format!("Created a new {entity}"),
        ActionType::Update => format!("Updated {entity}"),
        ActionType::Delete => format!("Deleted {entity}"),
        ActionType::LoginSuccess => format!("Successfully logged in {entity}"),
    }
}

#[derive(Debug, Error)]
enum SummaryError {
    #[error("description field is null")]
    NullDescription,
}

/// Short summary built from the well-known `name`, `status` and
/// `description` keys. Never fails; problems yield a fixed marker.
pub fn summarize_changes(id: AuditEventId, payload: &Payload) -> String {
    if payload.is_empty() {
        return NO_CHANGES_SUMMARY.to_string();
    }

    match build_summary(payload) {
        Ok(summary) => summary,
        Err(err) => {
            tracing::warn!(audit_id = %id, error = %err, "failed to generate changes summary");
            SUMMARY_UNAVAILABLE.to_string()
        }
    }
}

fn build_summary(payload: &Payload) -> Result<String, SummaryError> {
    let mut parts = Vec::new();

    if let Some(name) = payload.get("name") {
        parts.push(format!("Name: {}", display_value(name)));
    }
    if let Some(status) = payload.get("status") {
        parts.push(format!("Status: {}", display_value(status)));
    }
    if let Some(description) = payload.get("description") {
        if description.is_null() {
            return Err(SummaryError::NullDescription);
        }
        let text = display_value(description);
        parts.push(format!("Description: {}", preview(&text)));
    }

    if parts.is_empty() {
        return Ok(format!(
            "Entity modified with {} field(s) changed",
            payload.len()
        ));
    }

    Ok(parts.join("; "))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
