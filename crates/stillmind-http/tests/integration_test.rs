//! HTTP integration tests using a mock Axum server

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::{TimeZone, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use stillmind_core::{ErrorCode, ServerClock};
use stillmind_http::{ApiClient, HttpError, ParamStyle, RequestOptions};

async fn sessions_handler() -> Json<Value> {
    Json(json!({
        "status": 1,
        "serverDate": "01.01.2024 00:00:00",
        "sessions": [{"id": 7, "title": "Morning calm"}],
    }))
}

async fn login_handler() -> Json<Value> {
    Json(json!({
        "status": 0,
        "message": "bad creds",
        "serverDate": "02.06.2024 18:30:00",
    }))
}

async fn blank_failure_handler() -> Json<Value> {
    Json(json!({"status": 0}))
}

async fn malformed_handler() -> &'static str {
    "<html>gateway error</html>"
}

async fn no_status_handler() -> Json<Value> {
    Json(json!({"message": "hi", "serverDate": "15.03.2024 09:30:00"}))
}

async fn echo_query_handler(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let client_header = headers
        .get("x-client")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Json(json!({
        "status": 1,
        "params": params,
        "clientHeader": client_header,
    }))
}

async fn echo_form_handler(Form(params): Form<HashMap<String, String>>) -> Json<Value> {
    Json(json!({"status": 1, "params": params}))
}

async fn track_handler() -> &'static [u8] {
    b"stillmind-audio-bytes"
}

/// Start a test server and return its address
async fn start_test_server() -> SocketAddr {
    let app = Router::new()
        .route("/v1/sessions", get(sessions_handler))
        .route("/v1/login", post(login_handler))
        .route("/v1/blank-failure", get(blank_failure_handler))
        .route("/v1/malformed", get(malformed_handler))
        .route("/v1/no-status", get(no_status_handler))
        .route("/v1/echo-query", get(echo_query_handler))
        .route("/v1/echo-form", post(echo_form_handler))
        .route("/v1/track", get(track_handler));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(format!("http://{addr}"), ServerClock::new()).unwrap()
}

#[tokio::test]
async fn test_success_returns_payload_and_sets_clock() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let data = client
        .fetch(
            Method::GET,
            "/v1/sessions",
            &RequestOptions::default(),
            ErrorCode::General,
        )
        .await
        .unwrap();

    assert_eq!(data["sessions"][0]["title"], "Morning calm");
    assert_eq!(
        client.clock().last_observed(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
    );
}

#[tokio::test]
async fn test_business_failure_carries_server_message() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let err = client
        .fetch(
            Method::POST,
            "/v1/login",
            &RequestOptions::default(),
            ErrorCode::LogInFail,
        )
        .await
        .unwrap_err();

    let api = err.as_api().expect("expected a business error");
    assert_eq!(api.message, "bad creds");
    assert_eq!(api.code, ErrorCode::LogInFail);
    assert_eq!(api.code.value(), 10_002);
}

#[tokio::test]
async fn test_business_failure_still_updates_clock() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let _ = client
        .fetch(
            Method::POST,
            "/v1/login",
            &RequestOptions::default(),
            ErrorCode::LogInFail,
        )
        .await;

    assert_eq!(
        client.clock().last_observed(),
        Some(Utc.with_ymd_and_hms(2024, 6, 2, 18, 30, 0).unwrap()),
    );
}

#[tokio::test]
async fn test_failure_without_message_uses_default() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let err = client
        .fetch(
            Method::GET,
            "/v1/blank-failure",
            &RequestOptions::default(),
            ErrorCode::SignUpFail,
        )
        .await
        .unwrap_err();

    let api = err.as_api().expect("expected a business error");
    assert_eq!(api.message, "Failed to sign up");
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let err = client
        .fetch(
            Method::GET,
            "/v1/malformed",
            &RequestOptions::default(),
            ErrorCode::General,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::Malformed(_)));
    assert_eq!(client.clock().last_observed(), None);
}

#[tokio::test]
async fn test_missing_status_is_malformed() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let err = client
        .fetch(
            Method::GET,
            "/v1/no-status",
            &RequestOptions::default(),
            ErrorCode::General,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::Malformed(_)));
    // the body parsed, so its serverDate still stamps the clock
    assert_eq!(
        client.clock().last_observed(),
        Some(Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()),
    );
}

#[tokio::test]
async fn test_transport_failure_leaves_clock_untouched() {
    // Bind and immediately drop to get an address nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client
        .fetch(
            Method::GET,
            "/v1/sessions",
            &RequestOptions::default(),
            ErrorCode::General,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::Transport(_)));
    assert_eq!(client.clock().last_observed(), None);
}

#[tokio::test]
async fn test_query_params_and_headers_reach_the_server() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let opts = RequestOptions::default()
        .param("userId", "42")
        .header("X-Client", "ios-2.3");

    let data = client
        .fetch(Method::GET, "/v1/echo-query", &opts, ErrorCode::General)
        .await
        .unwrap();

    assert_eq!(data["params"]["userId"], "42");
    assert_eq!(data["clientHeader"], "ios-2.3");
}

#[tokio::test]
async fn test_form_params_reach_the_server() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let opts = RequestOptions::default()
        .param("email", "a@b.example")
        .style(ParamStyle::Form);

    let data = client
        .fetch(Method::POST, "/v1/echo-form", &opts, ErrorCode::General)
        .await
        .unwrap();

    assert_eq!(data["params"]["email"], "a@b.example");
}

#[tokio::test]
async fn test_download_writes_body_to_disk() {
    let addr = start_test_server().await;
    let client = client_for(addr);

    let dest = std::env::temp_dir().join(format!("stillmind-track-{}.bin", std::process::id()));
    let written = client
        .download(Method::GET, "/v1/track", &RequestOptions::default(), &dest)
        .await
        .unwrap();

    let contents = tokio::fs::read(&dest).await.unwrap();
    tokio::fs::remove_file(&dest).await.unwrap();

    assert_eq!(written, contents.len() as u64);
    assert_eq!(contents, b"stillmind-audio-bytes");
}
