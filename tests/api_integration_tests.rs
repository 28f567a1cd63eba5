//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use image_lru::{api::create_router, AppState, SharedImageCache};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity: usize) -> Router {
    let cache = SharedImageCache::with_capacity(capacity).unwrap();
    create_router(AppState::new(cache))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Stores an Alpha8 image of `bytes` pixels under `key`.
fn put_request(key: &str, bytes: usize) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/images/{}?width={}&height=1&format=alpha8", key, bytes))
        .body(Body::from(vec![1u8; bytes]))
        .unwrap()
}

fn get_request(key: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/images/{}", key))
        .body(Body::empty())
        .unwrap()
}

async fn status_of(app: &Router, request: Request<Body>) -> StatusCode {
    app.clone().oneshot(request).await.unwrap().status()
}

async fn stats(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

// == Store / Fetch Endpoint Tests ==

#[tokio::test]
async fn test_store_endpoint_success() {
    let app = create_test_app(1000);

    let response = app.clone().oneshot(put_request("logo", 400)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "logo");
    assert_eq!(json["byte_size"], 400);
    assert_eq!(json["cached"], true);
    assert_eq!(json["cache_bytes"], 400);
}

#[tokio::test]
async fn test_fetch_endpoint_returns_pixels_and_shape() {
    let app = create_test_app(1000);
    assert_eq!(status_of(&app, put_request("avatar", 12)).await, StatusCode::OK);

    let response = app.oneshot(get_request("avatar")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-image-width"], "12");
    assert_eq!(response.headers()["x-image-height"], "1");
    assert_eq!(response.headers()["x-image-format"], "alpha8");
    assert_eq!(response.headers()["content-type"], "application/octet-stream");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), vec![1u8; 12].as_slice());
}

#[tokio::test]
async fn test_url_keys_are_percent_decoded() {
    let app = create_test_app(1000);
    let encoded = "http%3A%2F%2Fcdn.example.com%2Fa.png";

    assert_eq!(status_of(&app, put_request(encoded, 10)).await, StatusCode::OK);

    let response = app.clone().oneshot(get_request(encoded)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_fetch_endpoint_not_found() {
    let app = create_test_app(1000);

    assert_eq!(status_of(&app, get_request("nonexistent")).await, StatusCode::NOT_FOUND);

    let json = stats(&app).await;
    assert_eq!(json["misses"], 1);
    assert_eq!(json["current_bytes"], 0);
}

#[tokio::test]
async fn test_store_rejects_mismatched_body() {
    let app = create_test_app(1000);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/images/bad?width=4&height=4&format=argb8888")
                .body(Body::from(vec![0u8; 10]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("expected 64"));
}

#[tokio::test]
async fn test_store_rejects_unknown_format() {
    let app = create_test_app(1000);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/images/bad?width=1&height=1&format=webp")
                .body(Body::from(vec![0u8; 4]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_delete_endpoint() {
    let app = create_test_app(1000);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/images/logo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// == Eviction Scenarios ==

#[tokio::test]
async fn test_third_image_evicts_oldest() {
    let app = create_test_app(1000);

    for key in ["A", "B", "C"] {
        assert_eq!(status_of(&app, put_request(key, 400)).await, StatusCode::OK);
    }

    assert_eq!(status_of(&app, get_request("A")).await, StatusCode::NOT_FOUND);
    assert_eq!(status_of(&app, get_request("B")).await, StatusCode::OK);
    assert_eq!(status_of(&app, get_request("C")).await, StatusCode::OK);

    let json = stats(&app).await;
    assert_eq!(json["current_bytes"], 800);
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["total_entries"], 2);
}

#[tokio::test]
async fn test_oversized_image_leaves_cache_empty() {
    let app = create_test_app(1000);

    let response = app.clone().oneshot(put_request("huge", 1200)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cached"], false);

    assert_eq!(status_of(&app, get_request("huge")).await, StatusCode::NOT_FOUND);
    assert_eq!(stats(&app).await["current_bytes"], 0);
}

#[tokio::test]
async fn test_recent_fetch_protects_from_eviction() {
    let app = create_test_app(1000);

    assert_eq!(status_of(&app, put_request("A", 300)).await, StatusCode::OK);
    assert_eq!(status_of(&app, put_request("B", 300)).await, StatusCode::OK);
    assert_eq!(status_of(&app, get_request("A")).await, StatusCode::OK);
    assert_eq!(status_of(&app, put_request("C", 500)).await, StatusCode::OK);

    assert_eq!(status_of(&app, get_request("B")).await, StatusCode::NOT_FOUND);
    assert_eq!(status_of(&app, get_request("A")).await, StatusCode::OK);
    assert_eq!(status_of(&app, get_request("C")).await, StatusCode::OK);
    assert_eq!(stats(&app).await["current_bytes"], 800);
}

// == Stats / Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(1000);

    assert_eq!(status_of(&app, put_request("A", 250)).await, StatusCode::OK);
    assert_eq!(status_of(&app, get_request("A")).await, StatusCode::OK);
    assert_eq!(status_of(&app, get_request("Z")).await, StatusCode::NOT_FOUND);

    let json = stats(&app).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["stores"], 1);
    assert_eq!(json["capacity_bytes"], 1000);
    assert_eq!(json["hit_rate"], 0.5);
    assert_eq!(json["utilization"], 0.25);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(1000);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == End-to-end over a socket ==

#[tokio::test]
async fn test_server_round_trip_over_tcp() {
    let app = create_test_app(4096);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let stored: Value = client
        .put(format!("{}/images/banner?width=8&height=8&format=rgb565", base))
        .body(vec![9u8; 128])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored["byte_size"], 128);

    let fetched = client
        .get(format!("{}/images/banner", base))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status(), reqwest::StatusCode::OK);
    assert_eq!(fetched.headers()["x-image-format"], "rgb565");
    assert_eq!(fetched.bytes().await.unwrap().len(), 128);

    let stats: Value = client
        .get(format!("{}/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["current_bytes"], 128);

    server.abort();
}
