// src/application/queries/audit/list.rs
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    AuditQueryService,
    common::{self, PageParams},
};
use crate::{
    application::{
        dto::{AuditEventDto, PageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::audit::{ActionType, AuditEvent, AuditEventId, PageRequest, window},
};

pub struct EntityTrailQuery {
    pub entity_type: String,
    pub entity_id: Uuid,
    pub page: PageParams,
}

pub struct ActorActionsQuery {
    pub actor_name: String,
    pub page: PageParams,
}

pub struct ActionTypeQuery {
    pub action_type: String,
    pub page: PageParams,
}

pub struct DateRangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub page: PageParams,
}

pub struct RecentQuery {
    pub page: PageParams,
}

impl AuditQueryService {
    pub async fn get_trail(&self, query: EntityTrailQuery) -> ApplicationResult<PageDto<AuditEventDto>> {
        common::require_non_blank(&query.entity_type, "entity type")?;
        let request = common::page_request(&query.page)?;

        let page = self
            .repo
            .find_by_entity(&query.entity_type, query.entity_id, &request)
            .await
            .map_err(|err| common::retrieval_failure("failed to retrieve audit trail", err))?;
        Ok(page.into())
    }

    pub async fn get_actor_actions(
        &self,
        query: ActorActionsQuery,
    ) -> ApplicationResult<PageDto<AuditEventDto>> {
        common::require_non_blank(&query.actor_name, "actor name")?;
        let request = common::page_request(&query.page)?;

        let page = self
            .repo
            .find_by_actor(&query.actor_name, &request)
            .await
            .map_err(|err| common::retrieval_failure("failed to retrieve actor actions", err))?;
        Ok(page.into())
    }

    pub async fn get_actions_by_type(
        &self,
        query: ActionTypeQuery,
    ) -> ApplicationResult<PageDto<AuditEventDto>> {
        let action_type = query
            .action_type
            .parse::<ActionType>()
            .map_err(ApplicationError::from_input)?;
        let request = common::page_request(&query.page)?;

        let events = self
            .repo
            .find_by_action_type(action_type)
            .await
            .map_err(|err| common::retrieval_failure("failed to retrieve actions by type", err))?;
        Ok(sorted_window(events, &request))
    }

    pub async fn get_by_date_range(
        &self,
        query: DateRangeQuery,
    ) -> ApplicationResult<PageDto<AuditEventDto>> {
        if query.start > query.end {
            return Err(ApplicationError::validation(
                "start date cannot be after end date",
            ));
        }
        let request = common::page_request(&query.page)?;

        let events = self
            .repo
            .find_by_timestamp_between(query.start, query.end)
            .await
            .map_err(|err| {
                common::retrieval_failure("failed to retrieve audits by date range", err)
            })?;
        Ok(sorted_window(events, &request))
    }

    pub async fn get_recent(&self, query: RecentQuery) -> ApplicationResult<PageDto<AuditEventDto>> {
        let request = common::page_request(&query.page)?;

        let page = self
            .repo
            .find_recent(&request)
            .await
            .map_err(|err| common::retrieval_failure("failed to retrieve recent audits", err))?;
        Ok(page.into())
    }

    pub async fn get_event(&self, id: &str) -> ApplicationResult<AuditEventDto> {
        let id = id
            .parse::<AuditEventId>()
            .map_err(ApplicationError::from_input)?;

        self.repo
            .find_by_id(id)
            .await
            .map_err(|err| common::retrieval_failure("failed to retrieve audit event", err))?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("audit event {id} not found")))
    }
}

/// Sorting and windowing for the axes the store cannot paginate natively.
fn sorted_window(mut events: Vec<AuditEvent>, request: &PageRequest) -> PageDto<AuditEventDto> {
    let sort = request.sort();
    events.sort_by(|a, b| sort.compare(a, b));
    window(events, request).into()
}
