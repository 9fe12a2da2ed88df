//! Integration tests for the docsearch HTTP API
//!
//! Tests the complete workflow: rebuild in the background, poll the
//! status endpoint, then search through the JSON API and the form.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt as TowerServiceExt;

use crate::common::{wait_until_idle, TestRepo};
use docsearch::core::config::Config;
use docsearch::core::services::Services;
use docsearch::http;

fn create_test_app() -> (Router, Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.index_dir = temp_dir.path().to_path_buf();

    let services = Arc::new(Services::new(config));
    (http::router(Arc::clone(&services)), services, temp_dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn index_and_wait(app: &Router, services: &Services, repo: &TestRepo) {
    let (status, body) = send(
        app,
        post_json(
            "/api/v1/index",
            json!({ "path": repo.path().to_string_lossy() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");

    let accepted: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(accepted["files"], 4);

    wait_until_idle(services);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _services, _temp) = create_test_app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_status_starts_idle() {
    let (app, _services, _temp) = create_test_app();

    let (status, body) = send(&app, get("/api/v1/index/status")).await;
    assert_eq!(status, StatusCode::OK);

    let status: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(status["state"], "idle");
    assert_eq!(status["version"], 0);
}

#[tokio::test]
async fn test_index_then_search_workflow() {
    let (app, services, _temp) = create_test_app();
    let repo = TestRepo::small();

    index_and_wait(&app, &services, &repo).await;

    let (_, body) = send(&app, get("/api/v1/index/status")).await;
    let status: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(status["state"], "ready");
    assert_eq!(status["document_count"], 4);
    assert_eq!(status["version"], 1);

    let (code, body) = send(&app, post_json("/api/v1/search", json!({ "query": "revenue" }))).await;
    assert_eq!(code, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["count"], 3);
    assert_eq!(response["terms"][0]["match"], "exact");
    assert!(response["hits"]
        .as_array()
        .unwrap()
        .iter()
        .all(|h| h["snippet"].is_string()));
}

#[tokio::test]
async fn test_search_before_any_index_is_empty() {
    let (app, _services, _temp) = create_test_app();

    let (status, body) = send(&app, post_json("/api/v1/search", json!({ "query": "revenue" }))).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["count"], 0);
}

#[tokio::test]
async fn test_search_query_too_long() {
    let (app, services, _temp) = create_test_app();
    let query = "a".repeat(services.config.search.max_query_length + 1);

    let (status, body) = send(&app, post_json("/api/v1/search", json!({ "query": query }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["status"], 400);
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn test_index_missing_directory() {
    let (app, _services, temp) = create_test_app();
    let missing = temp.path().join("does-not-exist");

    let (status, _) = send(
        &app,
        post_json("/api/v1/index", json!({ "path": missing.to_string_lossy() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rebuild_keeps_serving_previous_index() {
    let (app, services, _temp) = create_test_app();
    let mut repo = TestRepo::small();

    index_and_wait(&app, &services, &repo).await;

    repo.add_docx("Extra Memo.docx", &["Revenue forecast"]);
    let (status, _) = send(
        &app,
        post_json(
            "/api/v1/index",
            json!({ "path": repo.path().to_string_lossy() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    // Either the old or the new index answers, never an empty one
    let (_, body) = send(&app, post_json("/api/v1/search", json!({ "query": "revenue" }))).await;
    let response: Value = serde_json::from_str(&body).unwrap();
    let count = response["count"].as_u64().unwrap();
    assert!(count == 3 || count == 4, "unexpected count {count}");

    wait_until_idle(&services);
    let (_, body) = send(&app, post_json("/api/v1/search", json!({ "query": "forecast" }))).await;
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["count"], 1);
    assert_eq!(services.status().version, 2);
}

#[tokio::test]
async fn test_search_form_renders_hits() {
    let (app, services, _temp) = create_test_app();
    let repo = TestRepo::small();

    let (status, page) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<form method=\"post\" action=\"/\">"));

    index_and_wait(&app, &services, &repo).await;

    let (status, page) = send(&app, post_form("/", "query=annual")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Annual Budget.pdf</b> (title match)"));

    let (_, page) = send(&app, post_form("/", "query=costs")).await;
    assert!(page.contains("(line 3)"));
    assert!(page.contains("<code>Costs flat</code>"));
}

#[tokio::test]
async fn test_search_form_empty_query() {
    let (app, _services, _temp) = create_test_app();

    let (status, page) = send(&app, post_form("/", "query=")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("No results"));
}

#[tokio::test]
async fn test_corpus_form_uses_demo_corpus() {
    let (app, services, _temp) = create_test_app();
    let corpus = services.corpus().unwrap();
    let (id, text) = corpus.corpus().iter().next().unwrap();
    let word = text.split_whitespace().next().unwrap().to_string();

    let (status, body) = send(
        &app,
        post_json("/api/v1/corpus/search", json!({ "query": word })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert!(response["documents"][id.to_string()].is_string());

    let (status, page) = send(&app, get("/corpus")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("action=\"/corpus\""));
}
