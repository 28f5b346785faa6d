// Integration tests for the HTTP API
//
// The router is driven in-process with tower::ServiceExt::oneshot(); the
// provider is a scripted fake so no network is involved.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{session_with, ScriptedProvider, DATASET};
use numnum::context::{build_preamble, ContextDocument};
use numnum::providers::GeminiProvider;
use numnum::server::{RelayServer, ServerConfig, WELCOME_MESSAGE};
use numnum::session::ConversationSession;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // provides .oneshot()

fn app(session: Arc<ConversationSession>) -> axum::Router {
    RelayServer::new(session, ServerConfig::default()).router()
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// Read a response body as parsed JSON.
async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("response body is not valid JSON")
}

#[tokio::test]
async fn test_root_returns_welcome() {
    let session = session_with(ScriptedProvider::replying(&[]));
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();

    let resp = app(session).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], WELCOME_MESSAGE.as_bytes());
}

#[tokio::test]
async fn test_analyze_success() {
    let provider = ScriptedProvider::replying(&["Hi Alex! I'm Num."]);
    let session = session_with(provider.clone());

    let resp = app(session.clone())
        .oneshot(post_json(r#"{"input": "Hi, I'm Alex"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"message": "Hi Alex! I'm Num."}));
    assert_eq!(provider.calls(), 1);
    assert_eq!(session.turn_count().await, 1);
}

#[tokio::test]
async fn test_missing_input_is_400_without_provider_call() {
    let provider = ScriptedProvider::replying(&[]);
    let session = session_with(provider.clone());

    for body in [r#"{}"#, r#"{"text": "hi"}"#, r#"{"input": null}"#, "not json", r#"{"input": 42}"#] {
        let resp = app(session.clone()).oneshot(post_json(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(resp).await, json!({"error": "No input provided"}));
    }

    assert_eq!(provider.calls(), 0);
    assert_eq!(session.turn_count().await, 0);
}

#[tokio::test]
async fn test_missing_content_type_is_400() {
    let provider = ScriptedProvider::replying(&[]);
    let req = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .body(Body::from(r#"{"input": "hi"}"#))
        .unwrap();

    let resp = app(session_with(provider.clone())).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_is_500_and_history_unchanged() {
    let provider = ScriptedProvider::failing("Gemini API request failed: 503");
    let session = session_with(provider.clone());

    let resp = app(session.clone())
        .oneshot(post_json(r#"{"input": "What restaurants serve pasta near campus?"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("AI processing failed: "), "got: {error}");
    assert!(error.contains("503"));
    assert_eq!(session.turn_count().await, 0);
}

#[tokio::test]
async fn test_transport_failure_does_not_expose_api_key() {
    // Nothing listens on port 1, so the request fails inside the HTTP client.
    let provider = GeminiProvider::new("SECRET-KEY-123".to_string())
        .unwrap()
        .with_base_url("http://127.0.0.1:1");
    let preamble = build_preamble(&ContextDocument::from_text(DATASET));
    let session = Arc::new(ConversationSession::new(
        Arc::new(preamble),
        Arc::new(provider),
    ));

    let resp = app(session.clone())
        .oneshot(post_json(r#"{"input": "hi"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("AI processing failed: "), "got: {error}");
    assert!(!error.contains("SECRET-KEY-123"), "key leaked: {error}");
    assert_eq!(session.turn_count().await, 0);
}

#[tokio::test]
async fn test_follow_up_carries_history() {
    let provider = ScriptedProvider::replying(&["Hi Alex!", "Pasta Bella serves carbonara."]);
    let session = session_with(provider.clone());

    for input in ["Hi, I'm Alex", "What restaurants serve pasta near campus?"] {
        let body = json!({ "input": input }).to_string();
        let resp = app(session.clone()).oneshot(post_json(&body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let second = &provider.requests()[1];
    assert_eq!(second.messages.len(), 3);
    assert_eq!(second.messages[0].text, "Hi, I'm Alex");
    assert_eq!(second.messages[1].text, "Hi Alex!");
    assert!(second.messages[2]
        .text
        .ends_with("What restaurants serve pasta near campus?"));
    assert_eq!(session.turn_count().await, 2);
}

#[tokio::test]
async fn test_health_reports_idle_session() {
    let session = session_with(ScriptedProvider::replying(&[]));
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let resp = app(session).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "ok", "session": "idle"}));
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let session = session_with(ScriptedProvider::replying(&[]));
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/analyze")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let resp = app(session).oneshot(req).await.unwrap();

    assert!(resp.status().is_success());
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
