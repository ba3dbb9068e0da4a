use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{TestClient, test_app};

#[tokio::test]
async fn test_health_endpoint() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    let response = client.get("/health").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    let response = client.get("/metrics").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    let response = client.get("/does/not/exist").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("not found"));
}

#[tokio::test]
async fn test_topics_catalog() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    let response = client.get("/topics").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    let topics = body["topics"].as_array().expect("topics should be an array");
    assert_eq!(topics.len(), 6);

    let ids: Vec<&str> = topics
        .iter()
        .map(|t| t["id"].as_str().expect("topic id should be a string"))
        .collect();
    assert!(ids.contains(&"python_basics"));
    assert!(ids.contains(&"incident_response"));

    // Every entry carries a display name and description
    for topic in topics {
        assert!(!topic["name"].as_str().unwrap_or_default().is_empty());
        assert!(!topic["description"].as_str().unwrap_or_default().is_empty());
    }
}

#[tokio::test]
async fn test_random_topic_comes_from_catalog() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    let known = [
        "python_basics",
        "web_security",
        "networking",
        "linux_security",
        "cryptography",
        "incident_response",
    ];

    for _ in 0..10 {
        let response = client.get("/topics/random").await;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json();
        let id = body["topic"]["id"]
            .as_str()
            .expect("topic id should be a string");
        assert!(known.contains(&id), "unexpected topic {id}");
    }
}
