// Pipeline status ingestion through the full router.

use axum::http::StatusCode;
use pipeline_ingest::server::PIPELINE_STATUS_ROUTE;
use pipeline_ingest::services::MAX_EVENT_BYTES;
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::*;

#[tokio::test]
async fn status_event_is_published() {
    let (app, recorded) = recording_app(Outcome::Accept);
    let body = json!({
        "pipeline": "nightly-load",
        "runId": "run-123",
        "status": "Failed",
        "environment": "prd",
        "workspaceId": "ws-9",
        "startedUtc": "2024-03-01T01:00:00Z",
        "endedUtc": "2024-03-01T01:02:00Z",
        "durationMs": 120000
    });

    let (status, text) = read_body(post(app, PIPELINE_STATUS_ROUTE, Some("tenant-7"), body.to_string()).await).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(text.is_empty());

    let event = recorded.only_event();
    assert_eq!(event.partition_key, "tenant-7");
    assert_eq!(event.body["tenantId"], json!("tenant-7"));
    assert_eq!(event.body["pipeline"], json!("nightly-load"));
    assert_eq!(event.body["runId"], json!("run-123"));
    assert_eq!(event.body["status"], json!("Failed"));
    assert_eq!(event.body["durationMs"], json!(120000));
    assert_eq!(event.body["original"], body);
    assert!(event.body["receivedUtc"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn malformed_body_gets_defaults() {
    let (app, recorded) = recording_app(Outcome::Accept);

    let response = post(app, PIPELINE_STATUS_ROUTE, None, "<xml/>").await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let event = recorded.only_event();
    assert_eq!(event.partition_key, "unknown");
    assert_eq!(event.body["status"], json!("Unknown"));
    assert!(Uuid::parse_str(event.body["runId"].as_str().unwrap()).is_ok());
    assert_eq!(event.body["pipeline"], Value::Null);
    assert_eq!(event.body["original"], Value::Null);
}

#[tokio::test]
async fn generated_run_ids_are_unique() {
    let (app, recorded) = recording_app(Outcome::Accept);

    post(app.clone(), PIPELINE_STATUS_ROUTE, Some("t"), "{}").await;
    post(app, PIPELINE_STATUS_ROUTE, Some("t"), "{}").await;

    let events = recorded.events();
    assert_eq!(events.len(), 2);
    assert_ne!(events[0].body["runId"], events[1].body["runId"]);
}

#[tokio::test]
async fn oversize_event_is_rejected_with_413() {
    let (app, recorded) = recording_app(Outcome::Accept);
    let big = json!({ "pipeline": "p", "log": "x".repeat(MAX_EVENT_BYTES) }).to_string();

    let (status, text) = read_body(post(app, PIPELINE_STATUS_ROUTE, Some("t"), big).await).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(text.is_empty());
    assert_eq!(recorded.opened(), 0);
}

#[tokio::test]
async fn body_beyond_buffer_limit_is_413_with_empty_body() {
    let (app, recorded) = recording_app(Outcome::Accept);
    let huge = json!({ "log": "x".repeat(3 * 1024 * 1024) }).to_string();

    let (status, text) = read_body(post(app, PIPELINE_STATUS_ROUTE, Some("t"), huge).await).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(text.is_empty());
    assert_eq!(recorded.opened(), 0);
}

#[tokio::test]
async fn publish_failure_is_500_with_empty_body() {
    let (app, recorded) = recording_app(Outcome::RejectSend(503));

    let (status, text) = read_body(post(app, PIPELINE_STATUS_ROUTE, Some("t"), "{}").await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(text.is_empty());
    assert_eq!(recorded.closed(), 1);
}
