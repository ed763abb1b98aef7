// tests/e2e_http.rs
use axum::body::Body;
use axum::http::{Request, StatusCode};
use project_tracker::application::commands::audit::RecordEventCommand;
use project_tracker::domain::audit::ActionType;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt as _;
use uuid::Uuid;

mod support;

use support::{FailingAuditRepo, FailingCacheStore, TestContext, assert_error_response, read_json};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn seed(ctx: &TestContext, action_type: ActionType, entity_type: &str, entity_id: Uuid) {
    ctx.services
        .audit_recorder
        .record_event(RecordEventCommand {
            action_type,
            entity_type,
            entity_id: Some(entity_id),
            actor_name: "admin@example.com",
            snapshot: None,
        })
        .await
        .expect("seed event");
}

#[tokio::test]
async fn health_returns_ok() {
    let ctx = TestContext::new();
    let resp = ctx.router().oneshot(get("/health")).await.unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let direct = project_tracker::presentation::http::routes::health().await;
    assert_eq!(direct.0.status, "ok");
}

#[tokio::test]
async fn recent_wraps_page_in_envelope() {
    let ctx = TestContext::new();
    for _ in 0..3 {
        seed(&ctx, ActionType::Create, "Project", Uuid::new_v4()).await;
    }

    let resp = ctx
        .router()
        .oneshot(get("/api/audit/recent?size=2&sortDir=DESC"))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Recent audit activities retrieved successfully");
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["data"]["total_count"], 3);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(
        body["data"]["items"][0]["action_description"],
        "Created a new project"
    );
}

#[tokio::test]
async fn empty_result_is_still_ok() {
    let ctx = TestContext::new();
    let resp = ctx.router().oneshot(get("/api/audit/recent")).await.unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "No recent audit activities found");
    assert_eq!(body["data"]["total_count"], 0);
}

#[tokio::test]
async fn entity_trail_uses_entity_type_in_message() {
    let ctx = TestContext::new();
    let id = Uuid::new_v4();
    seed(&ctx, ActionType::Create, "Project", id).await;
    seed(&ctx, ActionType::Update, "Project", id).await;

    let resp = ctx
        .router()
        .oneshot(get(&format!("/api/audit/entity/Project/{id}")))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Retrieved audit trail for Project");
    assert_eq!(body["data"]["items"][0]["action_type"], "UPDATE");

    let resp = ctx
        .router()
        .oneshot(get(&format!("/api/audit/entity/Task/{id}")))
        .await
        .unwrap();
    let (_, body) = read_json(resp).await;
    assert_eq!(body["message"], "No audit trail found for Task");
}

#[tokio::test]
async fn action_filter_reports_empty_type() {
    let ctx = TestContext::new();
    seed(&ctx, ActionType::Create, "Task", Uuid::new_v4()).await;

    let resp = ctx
        .router()
        .oneshot(get("/api/audit/action?actionType=DELETE"))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No DELETE actions found");
}

#[tokio::test]
async fn invalid_parameters_are_rejected() {
    let ctx = TestContext::new();
    for uri in [
        "/api/audit/recent?size=0",
        "/api/audit/recent?size=101",
        "/api/audit/recent?page=-1",
        "/api/audit/recent?sortBy=payload",
        "/api/audit/recent?sortDir=sideways",
        "/api/audit/action?actionType=ARCHIVE",
        "/api/audit/entity/Project/not-a-uuid",
        "/api/audit/date-range?start=2024-12-31T00:00:00&end=2024-01-01T00:00:00",
        "/api/audit/date-range?start=soon&end=2024-01-01T00:00:00",
        "/api/audit/events/not-a-uuid",
    ] {
        let resp = ctx.router().oneshot(get(uri)).await.unwrap();
        assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    }
}

#[tokio::test]
async fn malformed_query_strings_use_error_body() {
    let ctx = TestContext::new();
    for uri in [
        "/api/audit/recent?size=abc",
        "/api/audit/recent?page=99999999999999999999",
        "/api/audit/action",
        "/api/audit/date-range?start=2024-01-01T00:00:00",
        "/api/audit/user/ada?page=first",
    ] {
        let resp = ctx.router().oneshot(get(uri)).await.unwrap();
        assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    }
}

#[tokio::test]
async fn date_range_accepts_local_and_offset_instants() {
    let ctx = TestContext::new();
    // the test clock sits at 2024-01-01T00:00:00Z
    seed(&ctx, ActionType::Create, "Developer", Uuid::new_v4()).await;

    let resp = ctx
        .router()
        .oneshot(get(
            "/api/audit/date-range?start=2023-12-31T00:00:00&end=2024-01-02T00:00:00Z",
        ))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Audits by date range retrieved successfully");
    assert_eq!(body["data"]["total_count"], 1);
}

#[tokio::test]
async fn single_event_lookup() {
    let ctx = TestContext::new();
    seed(&ctx, ActionType::Delete, "Task", Uuid::new_v4()).await;
    let (_, recent) = read_json(ctx.router().oneshot(get("/api/audit/recent")).await.unwrap()).await;
    let id = recent["data"]["items"][0]["id"].as_str().unwrap().to_string();

    let resp = ctx
        .router()
        .oneshot(get(&format!("/api/audit/events/{id}")))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], Value::String(id));
    assert_eq!(body["data"]["changes_summary"], "No changes recorded");

    let resp = ctx
        .router()
        .oneshot(get(&format!("/api/audit/events/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn stats_endpoint_counts_events() {
    let ctx = TestContext::new();
    seed(&ctx, ActionType::Create, "Task", Uuid::new_v4()).await;
    seed(&ctx, ActionType::Update, "Task", Uuid::new_v4()).await;

    let resp = ctx
        .router()
        .oneshot(get("/api/audit/stats?entityType=Task"))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["by_action_type"]["UPDATE"], 1);
    assert_eq!(body["data"]["entity_type_count"], 2);
    assert!(body["data"].get("actor_count").is_none());
}

#[tokio::test]
async fn store_outage_maps_to_500() {
    let services = support::services_with(
        Arc::new(FailingAuditRepo),
        Arc::new(FailingCacheStore::default()),
    );
    let app = support::router_with(services);
    let resp = app.oneshot(get("/api/audit/recent")).await.unwrap();
    assert_error_response(resp, StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").await;
}

#[tokio::test]
async fn openapi_document_is_served() {
    let ctx = TestContext::new();
    let resp = ctx
        .router()
        .oneshot(get("/api-docs/openapi.json"))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/audit/recent"].is_object());
    assert!(body["paths"]["/api/audit/events/{id}"].is_object());
}
