// src/presentation/http/openapi.rs
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::{OpenApi, ToSchema};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::audit::get_entity_audit_trail,
        crate::presentation::http::controllers::audit::get_user_actions,
        crate::presentation::http::controllers::audit::get_actions_by_type,
        crate::presentation::http::controllers::audit::get_audits_by_date_range,
        crate::presentation::http::controllers::audit::get_recent_audits,
        crate::presentation::http::controllers::audit::get_audit_event,
        crate::presentation::http::controllers::audit::get_audit_stats,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::application::dto::AuditEventDto,
            crate::application::dto::AuditStatsDto,
            crate::domain::audit::ActionType
        )
    ),
    tags(
        (name = "Audit", description = "Audit trail retrieval endpoints"),
        (name = "System", description = "System level endpoints")
    ),
    info(
        title = "Project Tracker Audit API",
        description = "Read side of the project tracker audit trail",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new().route(OPENAPI_PATH, get(serve_openapi))
}

pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let doc = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "docs/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(output_path)
}
