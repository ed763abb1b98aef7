// src/presentation/http/controllers/audit.rs
use crate::application::{
    dto::{AuditEventDto, AuditStatsDto, PageDto},
    error::ApplicationError,
    queries::audit::{
        ActionTypeQuery, ActorActionsQuery, AuditStatsQuery, DateRangeQuery, EntityTrailQuery,
        PageParams, RecentQuery,
    },
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::ApiQuery;
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

type AuditPage = ApiResponse<PageDto<AuditEventDto>>;

fn default_page() -> i64 {
    0
}

fn default_size() -> i64 {
    20
}

fn default_sort_by() -> String {
    "timestamp".into()
}

fn default_sort_dir() -> String {
    "desc".into()
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AuditPageParams {
    /// Page number (0-based)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size, 1 to 100
    #[serde(default = "default_size")]
    pub size: i64,
    /// Sort field
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Sort direction, asc or desc
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

impl From<AuditPageParams> for PageParams {
    fn from(params: AuditPageParams) -> Self {
        PageParams::new(params.page, params.size).sorted_by(params.sort_by, params.sort_dir)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ActionTypeParams {
    /// CREATE, UPDATE, DELETE or LOGIN_SUCCESS
    pub action_type: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeParams {
    /// Start instant, RFC 3339 or `YYYY-MM-DDTHH:MM:SS` read as UTC
    pub start: String,
    /// End instant, RFC 3339 or `YYYY-MM-DDTHH:MM:SS` read as UTC
    pub end: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AuditStatsParams {
    pub entity_type: Option<String>,
    pub actor_name: Option<String>,
}

fn respond(page: PageDto<AuditEventDto>, found: String, empty: String) -> Json<AuditPage> {
    let message = if page.is_empty() { empty } else { found };
    Json(ApiResponse::success(message, page))
}

fn parse_instant(value: &str, field: &str) -> Result<DateTime<Utc>, ApplicationError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ApplicationError::validation(format!("invalid {field} date '{value}'")))
}

#[utoipa::path(
    get,
    path = "/api/audit/entity/{entityType}/{entityId}",
    params(
        ("entityType" = String, Path, description = "Type of entity", example = "Project"),
        ("entityId" = Uuid, Path, description = "Entity unique identifier"),
        AuditPageParams
    ),
    responses(
        (status = 200, description = "Audit trail for one entity", body = ApiResponse<PageDto<AuditEventDto>>),
        (status = 400, description = "Invalid request parameters", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Audit store unavailable", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn get_entity_audit_trail(
    Extension(state): Extension<HttpState>,
    Path((entity_type, entity_id)): Path<(String, String)>,
    ApiQuery(params): ApiQuery<AuditPageParams>,
) -> HttpResult<Json<AuditPage>> {
    tracing::info!(entity_type = %entity_type, entity_id = %entity_id, "retrieving audit trail");
    let entity_id = Uuid::parse_str(&entity_id)
        .map_err(|_| ApplicationError::validation(format!("invalid entity id '{entity_id}'")))
        .into_http()?;

    let page = state
        .services
        .audit_queries
        .get_trail(EntityTrailQuery {
            entity_type: entity_type.clone(),
            entity_id,
            page: params.into(),
        })
        .await
        .into_http()?;

    Ok(respond(
        page,
        format!("Retrieved audit trail for {entity_type}"),
        format!("No audit trail found for {entity_type}"),
    ))
}

#[utoipa::path(
    get,
    path = "/api/audit/user/{actorName}",
    params(
        ("actorName" = String, Path, description = "Username or actor name", example = "admin@example.com"),
        AuditPageParams
    ),
    responses(
        (status = 200, description = "Actions performed by one actor", body = ApiResponse<PageDto<AuditEventDto>>),
        (status = 400, description = "Invalid request parameters", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Audit store unavailable", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn get_user_actions(
    Extension(state): Extension<HttpState>,
    Path(actor_name): Path<String>,
    ApiQuery(params): ApiQuery<AuditPageParams>,
) -> HttpResult<Json<AuditPage>> {
    tracing::info!(actor = %actor_name, "retrieving actor actions");
    let page = state
        .services
        .audit_queries
        .get_actor_actions(ActorActionsQuery {
            actor_name: actor_name.clone(),
            page: params.into(),
        })
        .await
        .into_http()?;

    Ok(respond(
        page,
        "User actions retrieved successfully".into(),
        format!("No actions found for user {actor_name}"),
    ))
}

#[utoipa::path(
    get,
    path = "/api/audit/action",
    params(ActionTypeParams, AuditPageParams),
    responses(
        (status = 200, description = "Events of one action type", body = ApiResponse<PageDto<AuditEventDto>>),
        (status = 400, description = "Invalid action type", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Audit store unavailable", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn get_actions_by_type(
    Extension(state): Extension<HttpState>,
    ApiQuery(filter): ApiQuery<ActionTypeParams>,
    ApiQuery(params): ApiQuery<AuditPageParams>,
) -> HttpResult<Json<AuditPage>> {
    tracing::info!(action_type = %filter.action_type, "retrieving actions by type");
    let action_type = filter.action_type;
    let page = state
        .services
        .audit_queries
        .get_actions_by_type(ActionTypeQuery {
            action_type: action_type.clone(),
            page: params.into(),
        })
        .await
        .into_http()?;

    Ok(respond(
        page,
        "Actions by type retrieved successfully".into(),
        format!("No {action_type} actions found"),
    ))
}

#[utoipa::path(
    get,
    path = "/api/audit/date-range",
    params(DateRangeParams, AuditPageParams),
    responses(
        (status = 200, description = "Events strictly between two instants", body = ApiResponse<PageDto<AuditEventDto>>),
        (status = 400, description = "Invalid date range", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Audit store unavailable", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn get_audits_by_date_range(
    Extension(state): Extension<HttpState>,
    ApiQuery(range): ApiQuery<DateRangeParams>,
    ApiQuery(params): ApiQuery<AuditPageParams>,
) -> HttpResult<Json<AuditPage>> {
    tracing::info!(start = %range.start, end = %range.end, "retrieving audits by date range");
    let start = parse_instant(&range.start, "start").into_http()?;
    let end = parse_instant(&range.end, "end").into_http()?;

    let page = state
        .services
        .audit_queries
        .get_by_date_range(DateRangeQuery {
            start,
            end,
            page: params.into(),
        })
        .await
        .into_http()?;

    Ok(respond(
        page,
        "Audits by date range retrieved successfully".into(),
        "No audits found in the specified date range".into(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/audit/recent",
    params(AuditPageParams),
    responses(
        (status = 200, description = "Most recent events", body = ApiResponse<PageDto<AuditEventDto>>),
        (status = 400, description = "Invalid request parameters", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Audit store unavailable", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn get_recent_audits(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<AuditPageParams>,
) -> HttpResult<Json<AuditPage>> {
    tracing::info!("retrieving recent audit activities");
    let page = state
        .services
        .audit_queries
        .get_recent(RecentQuery {
            page: params.into(),
        })
        .await
        .into_http()?;

    Ok(respond(
        page,
        "Recent audit activities retrieved successfully".into(),
        "No recent audit activities found".into(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/audit/events/{id}",
    params(("id" = Uuid, Path, description = "Audit event identifier")),
    responses(
        (status = 200, description = "A single audit event", body = ApiResponse<AuditEventDto>),
        (status = 400, description = "Malformed identifier", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No event with this identifier", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn get_audit_event(
    Extension(state): Extension<HttpState>,
    Path(id): Path<String>,
) -> HttpResult<Json<ApiResponse<AuditEventDto>>> {
    let event = state
        .services
        .audit_queries
        .get_event(&id)
        .await
        .into_http()?;
    Ok(Json(ApiResponse::success(
        "Audit event retrieved successfully",
        event,
    )))
}

#[utoipa::path(
    get,
    path = "/api/audit/stats",
    params(AuditStatsParams),
    responses(
        (status = 200, description = "Event counts", body = ApiResponse<AuditStatsDto>),
        (status = 400, description = "Invalid filter", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Audit store unavailable", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn get_audit_stats(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<AuditStatsParams>,
) -> HttpResult<Json<ApiResponse<AuditStatsDto>>> {
    let stats = state
        .services
        .audit_queries
        .statistics(AuditStatsQuery {
            entity_type: params.entity_type,
            actor_name: params.actor_name,
        })
        .await
        .into_http()?;
    Ok(Json(ApiResponse::success(
        "Audit statistics retrieved successfully",
        stats,
    )))
}
