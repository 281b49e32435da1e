//! HTTP 边界测试
//!
//! tower oneshot 直接打路由：查询往返、入参校验、探活与会话清除。

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mexr::agent::{compose_system_prompt, Planner};
use mexr::core::QueryOrchestrator;
use mexr::knowledge::KnowledgeBase;
use mexr::llm::MockLlmClient;
use mexr::memory::SessionStore;
use mexr::server::{create_router, AppState};

fn test_app(replies: Vec<Result<String, String>>) -> axum::Router {
    let mock = Arc::new(MockLlmClient::with_replies(replies));
    let planner = Planner::new(
        mock,
        compose_system_prompt("You are an anatomy assistant."),
        Duration::from_secs(5),
    );
    let orchestrator = QueryOrchestrator::new(
        Arc::new(KnowledgeBase::builtin()),
        Arc::new(SessionStore::new(10)),
        planner,
    );
    create_router(Arc::new(AppState { orchestrator }))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(Vec::new());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "MeXR Backend");
}

#[tokio::test]
async fn test_root_descriptor() {
    let app = test_app(Vec::new());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "MeXR Backend is running");
}

#[tokio::test]
async fn test_query_roundtrip() {
    let app = test_app(vec![
        Ok(r#"{"tool": "highlight_object", "args": {"target_id": "socket_heart"}}"#.to_string()),
        Ok("The heart goes in the chest cavity.".to_string()),
    ]);
    let body = r#"{
        "sessionID": "session-123",
        "context": {"heldObject": "heart"},
        "query": "Where does this go?"
    }"#;
    let response = app.oneshot(post_json("/medtech/query", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["displayText"], "The heart goes in the chest cavity.");
    assert_eq!(json["spokenResponse"], json["displayText"]);
    assert_eq!(json["actions"][0]["command"], "highlight");
    assert_eq!(json["actions"][0]["targetID"], "socket_heart");
    assert_eq!(json["actions"][0]["options"]["color"], "#00FF00");
}

#[tokio::test]
async fn test_query_unknown_organ_is_still_200() {
    let app = test_app(Vec::new());
    let body = r#"{
        "sessionID": "s1",
        "context": {"heldObject": "bogus"},
        "query": "What is this?"
    }"#;
    let response = app.oneshot(post_json("/medtech/query", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["displayText"], "Error: Organ with ID 'bogus' not found.");
    assert_eq!(json["spokenResponse"], "I'm sorry, I don't have information about that object.");
    assert_eq!(json["actions"].as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
async fn test_query_missing_field_rejected() {
    let app = test_app(Vec::new());
    let response = app
        .oneshot(post_json("/medtech/query", r#"{"sessionID": "s1"}"#))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_query_wrong_type_rejected() {
    let app = test_app(Vec::new());
    let body = r#"{
        "sessionID": 42,
        "context": {"heldObject": "heart"},
        "query": "hi"
    }"#;
    let response = app.oneshot(post_json("/medtech/query", body)).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_organs_listing() {
    let app = test_app(Vec::new());
    let response = app
        .oneshot(Request::builder().uri("/medtech/organs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let organs = json.as_array().unwrap();
    assert_eq!(organs.len(), 5);
    // 按 id 排序，heart 在首位
    assert_eq!(organs[0]["id"], "heart");
    assert_eq!(organs[0]["displayName"], "Heart");
    assert_eq!(organs[0]["socketID"], "socket_heart");
}

#[tokio::test]
async fn test_session_clear_endpoint() {
    let app = test_app(Vec::new());

    // 先产生一轮历史，再清除，同一路由器上连续 oneshot
    let query_body = r#"{
        "sessionID": "s1",
        "context": {"heldObject": "heart"},
        "query": "What is this?"
    }"#;
    let response = app
        .clone()
        .oneshot(post_json("/medtech/query", query_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/medtech/session/clear", r#"{"sessionID": "s1"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "cleared");
    assert_eq!(json["sessionID"], "s1");

    // 幂等：再清一次还是 200
    let response = app
        .oneshot(post_json("/medtech/session/clear", r#"{"sessionID": "s1"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
