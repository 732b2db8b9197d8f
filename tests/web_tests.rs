//! HTTP API tests
//!
//! Requests are sent straight to the router with `tower::ServiceExt::oneshot`,
//! without binding a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chip_xref::web::server::{create_router, routes};
use chip_xref::{MatchEngine, MatchingConfig};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    routes(Arc::new(MatchEngine::new(MatchingConfig::default())))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn search_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("invalid request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("invalid request")
}

#[tokio::test]
async fn test_health() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_search_single_part() {
    let (status, json) = send(search_request(&serde_json::json!({
        "query": "STM32F103C8T6"
    })))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["replacement_model"], "GD32F103C8T6");
    assert_eq!(data[0]["replace_type"], "pin_to_pin");
    assert!(json.get("suggestions").is_none());
}

#[tokio::test]
async fn test_search_list_of_parts() {
    let (status, json) = send(search_request(&serde_json::json!({
        "query": ["LM2903", "  ", "STM32F103C8T6", "lm2903"]
    })))
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["original_model"], "LM2903AVQDRG4Q1");
    assert_eq!(data[1]["original_model"], "STM32F103C8T6");
}

#[tokio::test]
async fn test_search_batch_string() {
    let (status, json) = send(search_request(&serde_json::json!({
        "query": "LM2903，STM32F103C8T6\nLM4050",
        "type": "batch"
    })))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_without_match_includes_suggestions() {
    let (status, json) = send(search_request(&serde_json::json!({
        "query": "TLV7333PDBVR"
    })))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["data"].as_array().unwrap().is_empty());

    let suggestions = json["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 5);
    assert_eq!(suggestions[0]["record"]["original_model"], "TLV73333PDBVR");
    assert!(suggestions[0]["similarity"].as_f64().unwrap() > 0.6);
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let (status, json) = send(search_request(&serde_json::json!({ "query": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["data"].as_array().unwrap().is_empty());

    let (status, json) = send(search_request(&serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_search_malformed_body_gets_json_rejection() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"query\": "))
        .unwrap();
    let (status, json) = send(request).await;
    assert!(status.is_client_error());
    assert_eq!(json["success"], false);
    assert!(json["data"].as_array().unwrap().is_empty());
    assert!(json["message"].is_string());

    let (status, json) = send(search_request(&serde_json::json!({ "query": 42 }))).await;
    assert!(status.is_client_error());
    assert_eq!(json["success"], false);

    let request = Request::builder()
        .method("POST")
        .uri("/api/search")
        .body(Body::from("query=NE555"))
        .unwrap();
    let (status, json) = send(request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_search_rejects_oversized_batch() {
    let queries: Vec<String> = (0..600).map(|i| format!("PART{i}")).collect();
    let (status, json) = send(search_request(&serde_json::json!({ "query": queries }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("Too many"));
}

#[tokio::test]
async fn test_suggest_endpoint() {
    let (status, json) = send(get("/api/suggest?q=TLV7333PDBVR&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "TLV7333PDBVR");
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 2);

    let (status, json) = send(get("/api/suggest")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_query");
}

#[tokio::test]
async fn test_stats_endpoint() {
    let (status, json) = send(get("/api/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stats"]["total"], 15);
    assert_eq!(json["stats"]["pin_to_pin"], 12);
    assert_eq!(json["stats"]["functional"], 3);
    assert_eq!(json["configuration"]["min_contains_len"], 4);
}

#[test]
fn test_router_with_security_layers_builds() {
    let engine = Arc::new(MatchEngine::new(MatchingConfig::default()));
    assert!(create_router(engine).is_ok());
}
