// src/infrastructure/repositories/postgres_audit_event.rs
use super::map_sqlx;
use crate::domain::audit::{
    ActionType, AuditEvent, AuditEventId, AuditEventRepository, NewAuditEvent, Page, PageRequest,
    Payload,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const COLUMNS: &str =
    "id, action_type, entity_type, entity_id, actor_name, occurred_at, payload::text AS payload";

#[derive(Clone)]
pub struct PostgresAuditEventRepository {
    pool: PgPool,
}

impl PostgresAuditEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        filter: Filter<'_>,
        order_by: String,
        request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM audit_events WHERE {} ORDER BY {order_by} LIMIT ${} OFFSET ${}",
            filter.clause(),
            filter.arity() + 1,
            filter.arity() + 2,
        );
        let query = filter.bind_rows(sqlx::query_as::<_, AuditEventRow>(&sql));
        let rows = query
            .bind(i64::from(request.size()))
            .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let total = self.count(filter).await?;
        let items = rows
            .into_iter()
            .map(AuditEvent::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(items, total, request))
    }

    async fn fetch_all(&self, filter: Filter<'_>, order_by: &str) -> DomainResult<Vec<AuditEvent>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM audit_events WHERE {} ORDER BY {order_by}",
            filter.clause()
        );
        let rows = filter
            .bind_rows(sqlx::query_as::<_, AuditEventRow>(&sql))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(AuditEvent::try_from).collect()
    }

    async fn count(&self, filter: Filter<'_>) -> DomainResult<u64> {
        let sql = format!("SELECT COUNT(1) FROM audit_events WHERE {}", filter.clause());
        filter
            .bind_scalar(sqlx::query_scalar::<_, i64>(&sql))
            .fetch_one(&self.pool)
            .await
            .map(|count| count.max(0) as u64)
            .map_err(map_sqlx)
    }
}

/// Row predicates used by the finders. Only fixed SQL fragments are
/// rendered; every caller-supplied value goes through a bind parameter.
#[derive(Clone, Copy)]
enum Filter<'a> {
    All,
    Entity(&'a str, Uuid),
    Actor(&'a str),
    ActionType(ActionType),
    EntityType(&'a str),
    Between(DateTime<Utc>, DateTime<Utc>),
}

type RowQuery<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, AuditEventRow, sqlx::postgres::PgArguments>;
type ScalarQuery<'q> =
    sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>;

impl<'a> Filter<'a> {
    const fn clause(self) -> &'static str {
        match self {
            Self::All => "TRUE",
            Self::Entity(..) => "entity_type = $1 AND entity_id = $2",
            Self::Actor(_) => "actor_name = $1",
            Self::ActionType(_) => "action_type = $1",
            Self::EntityType(_) => "entity_type = $1",
            Self::Between(..) => "occurred_at > $1 AND occurred_at < $2",
        }
    }

    const fn arity(self) -> usize {
        match self {
            Self::All => 0,
            Self::Actor(_) | Self::ActionType(_) | Self::EntityType(_) => 1,
            Self::Entity(..) | Self::Between(..) => 2,
        }
    }

    fn bind_rows<'q>(self, query: RowQuery<'q>) -> RowQuery<'q>
    where
        'a: 'q,
    {
        match self {
            Self::All => query,
            Self::Entity(entity_type, entity_id) => query.bind(entity_type).bind(entity_id),
            Self::Actor(value) | Self::EntityType(value) => query.bind(value),
            Self::ActionType(action_type) => query.bind(action_type.as_str()),
            Self::Between(start, end) => query.bind(start).bind(end),
        }
    }

    fn bind_scalar<'q>(self, query: ScalarQuery<'q>) -> ScalarQuery<'q>
    where
        'a: 'q,
    {
        match self {
            Self::All => query,
            Self::Entity(entity_type, entity_id) => query.bind(entity_type).bind(entity_id),
            Self::Actor(value) | Self::EntityType(value) => query.bind(value),
            Self::ActionType(action_type) => query.bind(action_type.as_str()),
            Self::Between(start, end) => query.bind(start).bind(end),
        }
    }
}

/// Append order. Keeps LIMIT/OFFSET pages disjoint when the requested
/// column has duplicates, and matches the in-memory store's stable sort.
const TIE_BREAK: &str = "occurred_at ASC, id ASC";

fn order_clause(request: &PageRequest) -> String {
    let sort = request.sort();
    format!(
        "{} {} {}, {TIE_BREAK}",
        sort.field.column(),
        sort.direction.as_sql(),
        sort.direction.nulls_sql()
    )
}

#[derive(Debug, FromRow)]
struct AuditEventRow {
    id: Uuid,
    action_type: String,
    entity_type: String,
    entity_id: Option<Uuid>,
    actor_name: String,
    occurred_at: DateTime<Utc>,
    payload: String,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = DomainError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let action_type = row.action_type.parse::<ActionType>().map_err(|_| {
            DomainError::Persistence(format!(
                "stored audit event {} has unknown action type '{}'",
                row.id, row.action_type
            ))
        })?;
        let payload = serde_json::from_str::<Payload>(&row.payload).map_err(|err| {
            DomainError::Persistence(format!(
                "stored audit event {} has an unreadable payload: {err}",
                row.id
            ))
        })?;

        Ok(AuditEvent {
            id: AuditEventId::from(row.id),
            action_type,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            actor_name: row.actor_name,
            timestamp: row.occurred_at,
            payload,
        })
    }
}

#[async_trait]
impl AuditEventRepository for PostgresAuditEventRepository {
    async fn append(&self, event: NewAuditEvent) -> DomainResult<AuditEvent> {
        let id = AuditEventId::generate();
        let payload = serde_json::to_string(&event.payload)
            .map_err(|err| DomainError::Persistence(format!("failed to encode payload: {err}")))?;

        let row = sqlx::query_as::<_, AuditEventRow>(&format!(
            "INSERT INTO audit_events (id, action_type, entity_type, entity_id, actor_name, occurred_at, payload)
             VALUES ($1, $2, $3, $4, $5, $6, CAST($7 AS JSON))
             RETURNING {COLUMNS}"
        ))
        .bind(*id.as_uuid())
        .bind(event.action_type.as_str())
        .bind(&event.entity_type)
        .bind(event.entity_id)
        .bind(&event.actor_name)
        .bind(event.timestamp)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        AuditEvent::try_from(row)
    }

    async fn find_by_id(&self, id: AuditEventId) -> DomainResult<Option<AuditEvent>> {
        let row = sqlx::query_as::<_, AuditEventRow>(&format!(
            "SELECT {COLUMNS} FROM audit_events WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(AuditEvent::try_from).transpose()
    }

    async fn find_by_entity(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>> {
        self.fetch_page(
            Filter::Entity(entity_type, entity_id),
            order_clause(request),
            request,
        )
        .await
    }

    async fn find_by_actor(
        &self,
        actor_name: &str,
        request: &PageRequest,
    ) -> DomainResult<Page<AuditEvent>> {
        let order_by = format!("occurred_at DESC, {}", order_clause(request));
        self.fetch_page(Filter::Actor(actor_name), order_by, request)
            .await
    }

    async fn find_by_action_type(&self, action_type: ActionType) -> DomainResult<Vec<AuditEvent>> {
        self.fetch_all(Filter::ActionType(action_type), "occurred_at DESC")
            .await
    }

    async fn find_by_timestamp_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<AuditEvent>> {
        self.fetch_all(Filter::Between(start, end), "occurred_at ASC")
            .await
    }

    async fn find_recent(&self, request: &PageRequest) -> DomainResult<Page<AuditEvent>> {
        self.fetch_page(Filter::All, order_clause(request), request)
            .await
    }

    async fn count_by_action_type(&self, action_type: ActionType) -> DomainResult<u64> {
        self.count(Filter::ActionType(action_type)).await
    }

    async fn count_by_entity_type(&self, entity_type: &str) -> DomainResult<u64> {
        self.count(Filter::EntityType(entity_type)).await
    }

    async fn count_by_actor(&self, actor_name: &str) -> DomainResult<u64> {
        self.count(Filter::Actor(actor_name)).await
    }
}
