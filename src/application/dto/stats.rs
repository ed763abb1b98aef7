// src/application/dto/stats.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Event counts per action type, optionally narrowed counts for one
/// entity type and one actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditStatsDto {
    pub by_action_type: BTreeMap<String, u64>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_count: Option<u64>,
}
