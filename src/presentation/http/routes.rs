// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::audit,
    openapi::{self, StatusResponse},
};
use axum::{Extension, Router, http::Method, routing::get};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .nest("/api/audit", audit_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

fn audit_routes() -> Router {
    Router::new()
        .route(
            "/entity/{entity_type}/{entity_id}",
            get(audit::get_entity_audit_trail),
        )
        .route("/user/{actor_name}", get(audit::get_user_actions))
        .route("/action", get(audit::get_actions_by_type))
        .route("/date-range", get(audit::get_audits_by_date_range))
        .route("/recent", get(audit::get_recent_audits))
        .route("/events/{id}", get(audit::get_audit_event))
        .route("/stats", get(audit::get_audit_stats))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
