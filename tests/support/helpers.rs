// tests/support/helpers.rs
use super::mocks::ManualClock;
use axum::body;
use axum::http::StatusCode;
use project_tracker::application::{ports::cache::CacheStore, services::ApplicationServices};
use project_tracker::domain::audit::AuditEventRepository;
use project_tracker::domain::cache::CacheTtls;
use project_tracker::infrastructure::{
    cache::InMemoryCacheStore, repositories::InMemoryAuditEventRepository,
};
use project_tracker::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;

/// Services over in-memory stores plus handles to the pieces tests poke at.
pub struct TestContext {
    pub services: Arc<ApplicationServices>,
    pub audit_repo: Arc<InMemoryAuditEventRepository>,
    pub cache_store: Arc<InMemoryCacheStore>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let audit_repo = Arc::new(InMemoryAuditEventRepository::new());
        let cache_store = Arc::new(InMemoryCacheStore::new());
        let clock = Arc::new(ManualClock::default());
        let services = Arc::new(ApplicationServices::new(
            audit_repo.clone(),
            cache_store.clone(),
            CacheTtls::default(),
            clock.clone(),
        ));
        Self {
            services,
            audit_repo,
            cache_store,
            clock,
        }
    }

    pub fn router(&self) -> axum::Router {
        build_router(HttpState {
            services: Arc::clone(&self.services),
        })
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn services_with(
    audit_repo: Arc<dyn AuditEventRepository>,
    cache_store: Arc<dyn CacheStore>,
) -> Arc<ApplicationServices> {
    Arc::new(ApplicationServices::new(
        audit_repo,
        cache_store,
        CacheTtls::default(),
        Arc::new(ManualClock::default()),
    ))
}

pub fn router_with(services: Arc<ApplicationServices>) -> axum::Router {
    build_router(HttpState { services })
}

/// Split a response into its status and JSON body.
pub async fn read_json(resp: axum::response::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {}", ct);
    let json = serde_json::from_slice(&body_bytes).expect("expected valid json body");
    (status, json)
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    let (status, json) = read_json(resp).await;
    assert_eq!(status, expected_status, "unexpected status, body: {json}");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {}", err_field);
    assert_eq!(json.get("success"), Some(&Value::Bool(false)));
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
