//! API integration tests.
//!
//! These tests drive the full router with axum's test utilities against the
//! in-memory demo store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use order_desk::api::{create_router, create_router_with_state, AppState};
use order_desk::{DialogueEngine, InMemoryBackend};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a JSON request.
fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Helper to extract body as string.
async fn response_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&body).to_string()
}

/// Helper to extract JSON from response.
async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Send one chat message and return the reply text.
async fn chat(app: &Router, uri: &str, body: Value) -> String {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, uri, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    json["reply"].as_str().unwrap_or_default().to_string()
}

fn demo_state() -> (AppState, Arc<InMemoryBackend>) {
    let backend = Arc::new(InMemoryBackend::with_demo_data());
    let engine = DialogueEngine::new(backend.clone());
    (AppState::new(engine), backend)
}

// ============================================================================
// Health & Info Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router();

    let response = app
        .oneshot(json_request(Method::GET, "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "OK");
}

#[tokio::test]
async fn test_api_info_endpoint() {
    let (state, _) = demo_state();
    let app = create_router_with_state(state);

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["name"], "order-desk");
    assert_eq!(json["status"], "running");
    assert_eq!(json["sessions"], 0);
}

#[tokio::test]
async fn test_api_info_counts_sessions() {
    let (state, _) = demo_state();
    let app = create_router_with_state(state);

    chat(&app, "/chat", json!({"message": "hello", "session": "a"})).await;
    chat(&app, "/chat", json!({"message": "hello", "session": "b"})).await;

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1", None))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(json["sessions"], 2);
}

// ============================================================================
// Chat Tests
// ============================================================================

#[tokio::test]
async fn test_greeting() {
    let app = create_router();

    let reply = chat(&app, "/chat", json!({"message": "hello"})).await;
    assert_eq!(
        reply,
        "Hi! I can help with tracking, refunds, returns, and complaints. What would you like to do?"
    );
}

#[tokio::test]
async fn test_versioned_chat_route() {
    let app = create_router();

    let reply = chat(&app, "/api/v1/chat", json!({"message": "bye"})).await;
    assert_eq!(reply, "Thanks for chatting. Have a great day!");
}

#[tokio::test]
async fn test_missing_message_is_fallback() {
    let app = create_router();

    let reply = chat(&app, "/chat", json!({})).await;
    assert!(reply.starts_with("Sorry, I didn’t understand."));
}

#[tokio::test]
async fn test_track_in_one_message() {
    let app = create_router();

    let reply = chat(&app, "/chat", json!({"message": "track ORD1001"})).await;
    assert!(reply.starts_with("Order ORD1001 is *out for delivery*. ETA: "));
    assert!(reply.ends_with("Summary: Order ORD1001, status out_for_delivery."));
}

#[tokio::test]
async fn test_refund_across_two_messages() {
    let (state, backend) = demo_state();
    let app = create_router_with_state(state);

    let reply = chat(&app, "/chat", json!({"message": "I want a refund", "session": "s1"})).await;
    assert_eq!(reply, "Sure. Please provide your Order ID to start a refund.");

    let reply = chat(&app, "/chat", json!({"message": "ORD1001", "session": "s1"})).await;
    assert!(reply.starts_with("Refund created: RFD-"));
    assert!(reply.contains("amount ₹1299, SLA 5 days"));

    assert_eq!(backend.refunds().len(), 1);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let (state, backend) = demo_state();
    let app = create_router_with_state(state);

    chat(&app, "/chat", json!({"message": "refund please", "session": "alice"})).await;

    // Bob has no pending flow, so a bare order id is not understood.
    let reply = chat(&app, "/chat", json!({"message": "ORD1001", "session": "bob"})).await;
    assert!(reply.starts_with("Sorry, I didn’t understand."));
    assert!(backend.refunds().is_empty());

    let reply = chat(&app, "/chat", json!({"message": "ORD1001", "session": "alice"})).await;
    assert!(reply.starts_with("Refund created:"));
}

#[tokio::test]
async fn test_blank_session_uses_default() {
    let (state, _) = demo_state();
    let app = create_router_with_state(state.clone());

    chat(&app, "/chat", json!({"message": "track my parcel", "session": "  "})).await;
    let reply = chat(&app, "/chat", json!({"message": "ORD1002"})).await;
    assert!(reply.starts_with("Order ORD1002 is currently *created*."));
    assert_eq!(state.engine.sessions().count(), 1);
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let app = create_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_router();

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1/orders", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_headers() {
    let app = create_router();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/chat")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
