use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::{TestClient, jwt, test_app};

#[tokio::test]
async fn test_missing_token_rejected() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    let response = client
        .post_json("/quiz/start", &json!({ "topic": "python_basics" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap_or_default().contains("Authentication"));
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    let response = client
        .post_json_with_auth(
            "/quiz/start",
            &json!({ "topic": "python_basics" }),
            "not.a.token",
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret_rejected() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    let token = jwt::create_test_token(Uuid::new_v4(), "learner@example.com", "some_other_secret");
    let response = client
        .post_json_with_auth("/quiz/start", &json!({ "topic": "python_basics" }), &token)
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_analytics_requires_auth() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    client
        .get("/analytics/performance")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    client
        .get("/analytics/history")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    client
        .get("/progress/summary")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_topics_do_not_require_auth() {
    let (router, _state) = test_app();
    let client = TestClient::new(router);

    client.get("/topics").await.assert_status(StatusCode::OK);
}
