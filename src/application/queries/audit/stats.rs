// src/application/queries/audit/stats.rs
use super::{AuditQueryService, common};
use crate::{
    application::{dto::AuditStatsDto, error::ApplicationResult},
    domain::audit::ActionType,
};

#[derive(Debug, Clone, Default)]
pub struct AuditStatsQuery {
    pub entity_type: Option<String>,
    pub actor_name: Option<String>,
}

impl AuditQueryService {
    pub async fn statistics(&self, query: AuditStatsQuery) -> ApplicationResult<AuditStatsDto> {
        if let Some(entity_type) = query.entity_type.as_deref() {
            common::require_non_blank(entity_type, "entity type")?;
        }
        if let Some(actor_name) = query.actor_name.as_deref() {
            common::require_non_blank(actor_name, "actor name")?;
        }

        let mut stats = AuditStatsDto::default();
        for action_type in ActionType::ALL {
            let count = self
                .repo
                .count_by_action_type(action_type)
                .await
                .map_err(|err| common::retrieval_failure("failed to count audit events", err))?;
            stats.by_action_type.insert(action_type.as_str().to_string(), count);
            stats.total += count;
        }

        if let Some(entity_type) = query.entity_type.as_deref() {
            stats.entity_type_count = Some(
                self.repo
                    .count_by_entity_type(entity_type)
                    .await
                    .map_err(|err| common::retrieval_failure("failed to count audit events", err))?,
            );
        }
        if let Some(actor_name) = query.actor_name.as_deref() {
            stats.actor_count = Some(
                self.repo
                    .count_by_actor(actor_name)
                    .await
                    .map_err(|err| common::retrieval_failure("failed to count audit events", err))?,
            );
        }

        Ok(stats)
    }
}
