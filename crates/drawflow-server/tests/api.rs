//! End-to-end tests of the HTTP API over the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use drawflow_core::{EditorDocument, SaveOutcome};
use drawflow_graph::{EditorStore, GraphError, MemoryStore};
use drawflow_server::config::ServerConfig;
use drawflow_server::handlers::{EMPTY, NO_EDITOR, NO_NEW_EDITOR};
use drawflow_server::{build_router, AppState};

fn app_with(store: Arc<dyn EditorStore>) -> Router {
    build_router(AppState::new(store), &ServerConfig::default())
}

fn fresh_app() -> Router {
    app_with(Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.expect("response")
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = send(
        app,
        Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .expect("request"),
    )
    .await;

    let status = response.status();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let value: String = serde_json::from_slice(&body).expect("json string body");
    (status, value)
}

#[tokio::test]
async fn fresh_database_reads_empty() {
    let app = fresh_app();
    assert_eq!(get(&app, "/readEditor").await, (StatusCode::OK, EMPTY.to_string()));
}

#[tokio::test]
async fn first_save_creates_then_reads_back() {
    let app = fresh_app();

    let (status, body) = get(&app, "/saveEditor?Editor=hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "created");

    assert_eq!(get(&app, "/readEditor").await.1, "hello");
}

#[tokio::test]
async fn second_save_updates_in_place() {
    let app = fresh_app();
    get(&app, "/saveEditor?Editor=hello").await;

    assert_eq!(get(&app, "/saveEditor?Editor=world").await.1, "updated");
    assert_eq!(get(&app, "/readEditor").await.1, "world");
}

#[tokio::test]
async fn save_without_field_on_empty_database_writes_nothing() {
    let app = fresh_app();

    assert_eq!(get(&app, "/saveEditor").await, (StatusCode::OK, NO_EDITOR.to_string()));
    assert_eq!(get(&app, "/readEditor").await.1, EMPTY);
}

#[tokio::test]
async fn save_without_field_keeps_existing_value() {
    let app = fresh_app();
    get(&app, "/saveEditor?Editor=kept").await;

    assert_eq!(
        get(&app, "/saveEditor?other=1").await,
        (StatusCode::OK, NO_NEW_EDITOR.to_string())
    );
    assert_eq!(get(&app, "/readEditor").await.1, "kept");
}

#[tokio::test]
async fn repeated_identical_saves_are_updates() {
    let app = fresh_app();

    assert_eq!(get(&app, "/saveEditor?Editor=same").await.1, "created");
    assert_eq!(get(&app, "/saveEditor?Editor=same").await.1, "updated");
    assert_eq!(get(&app, "/readEditor").await.1, "same");
    assert_eq!(get(&app, "/saveEditor?Editor=same").await.1, "updated");
    assert_eq!(get(&app, "/readEditor").await.1, "same");
}

#[tokio::test]
async fn empty_value_counts_as_supplied() {
    let app = fresh_app();

    assert_eq!(get(&app, "/saveEditor?Editor=").await.1, "created");
    assert_eq!(get(&app, "/readEditor").await.1, "");
}

#[tokio::test]
async fn empty_value_overwrites_existing_content() {
    let app = fresh_app();
    get(&app, "/saveEditor?Editor=drawing").await;

    assert_eq!(get(&app, "/saveEditor?Editor=").await.1, "updated");
    assert_eq!(get(&app, "/readEditor").await.1, "");
}

#[tokio::test]
async fn first_repeated_field_wins() {
    let app = fresh_app();

    get(&app, "/saveEditor?Editor=a&Editor=b").await;
    assert_eq!(get(&app, "/readEditor").await.1, "a");
}

#[tokio::test]
async fn encoded_drawflow_payload_round_trips() {
    let app = fresh_app();
    let payload = r#"{"drawflow":{"Home":{"data":{"1":{"id":1,"name":"start"}}}}}"#;
    let encoded: String = payload
        .bytes()
        .map(|b| format!("%{b:02X}"))
        .collect();

    get(&app, &format!("/saveEditor?Editor={encoded}")).await;
    assert_eq!(get(&app, "/readEditor").await.1, payload);
}

#[tokio::test]
async fn field_name_is_case_sensitive() {
    let app = fresh_app();

    assert_eq!(get(&app, "/saveEditor?editor=lower").await.1, NO_EDITOR);
    assert_eq!(get(&app, "/readEditor").await.1, EMPTY);
}

#[tokio::test]
async fn post_is_not_routed() {
    let app = fresh_app();
    let response = send(
        &app,
        Request::builder()
            .uri("/saveEditor?Editor=x")
            .method("POST")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ── Failure path ─────────────────────────────────────────────────

struct FailingStore;

#[async_trait]
impl EditorStore for FailingStore {
    async fn reset(&self, _drop_data: bool) -> Result<(), GraphError> {
        Err(GraphError::Dgraph("alter refused".to_string()))
    }

    async fn find_editor(&self) -> Result<Option<EditorDocument>, GraphError> {
        Err(GraphError::Dgraph("query refused".to_string()))
    }

    async fn save_editor(&self, _content: &str) -> Result<SaveOutcome, GraphError> {
        Err(GraphError::Dgraph("mutation refused".to_string()))
    }
}

#[tokio::test]
async fn store_failures_are_500_json_strings() {
    let app = app_with(Arc::new(FailingStore));

    let (status, body) = get(&app, "/readEditor").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("query refused"));

    let (status, body) = get(&app, "/saveEditor").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("query refused"));

    let (status, body) = get(&app, "/saveEditor?Editor=x").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("mutation refused"));
}

#[tokio::test]
async fn initialize_swallows_reset_failures() {
    // Must return normally; the failure is only logged.
    drawflow_graph::initialize(&FailingStore, true).await;
}

#[tokio::test]
async fn initialize_wipes_existing_document() {
    let store = Arc::new(MemoryStore::new());
    store.save_editor("before restart").await.unwrap();

    drawflow_graph::initialize(store.as_ref(), true).await;

    let app = app_with(store);
    assert_eq!(get(&app, "/readEditor").await.1, EMPTY);
}

// ── Middleware ───────────────────────────────────────────────────

#[tokio::test]
async fn cors_preflight_mirrors_origin() {
    let app = fresh_app();
    let response = send(
        &app,
        Request::builder()
            .uri("/readEditor")
            .method("OPTIONS")
            .header(header::ORIGIN, "http://localhost:8081")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-csrf-token")
            .body(Body::empty())
            .expect("request"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:8081"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "300");
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "GET"
    );
    let allowed = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains("x-csrf-token"));
    assert!(allowed.contains("xsrf-token"));
}

#[tokio::test]
async fn simple_request_gets_cors_headers() {
    let app = fresh_app();
    let response = send(
        &app,
        Request::builder()
            .uri("/readEditor")
            .method("GET")
            .header(header::ORIGIN, "http://example.test")
            .body(Body::empty())
            .expect("request"),
    )
    .await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://example.test"
    );
}

#[tokio::test]
async fn request_id_is_generated_or_propagated() {
    let app = fresh_app();

    let response = send(
        &app,
        Request::builder()
            .uri("/readEditor")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    let generated = response.headers().get("x-request-id").unwrap();
    assert!(!generated.is_empty());

    let response = send(
        &app,
        Request::builder()
            .uri("/readEditor")
            .header("x-request-id", "client-chosen-id")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "client-chosen-id"
    );
}
