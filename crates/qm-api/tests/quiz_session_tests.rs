use axum::http::StatusCode;
use qm_engine::QuizSession;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::{TestClient, jwt, test_app};

#[tokio::test]
async fn test_start_rejects_zero_questions() {
    let (router, state) = test_app();
    let client = TestClient::new(router);
    let token = jwt::create_test_token(Uuid::new_v4(), "learner@example.com", &state.jwt_secret);

    let response = client
        .post_json_with_auth(
            "/quiz/start",
            &json!({ "topic": "python_basics", "number_of_questions": 0 }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("number_of_questions")
    );
}

#[tokio::test]
async fn test_start_rejects_oversized_session() {
    let (router, state) = test_app();
    let client = TestClient::new(router);
    let token = jwt::create_test_token(Uuid::new_v4(), "learner@example.com", &state.jwt_secret);

    let response = client
        .post_json_with_auth(
            "/quiz/start",
            &json!({ "topic": "python_basics", "number_of_questions": 51 }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_start_rejects_unknown_topic() {
    let (router, state) = test_app();
    let client = TestClient::new(router);
    let token = jwt::create_test_token(Uuid::new_v4(), "learner@example.com", &state.jwt_secret);

    let response = client
        .post_json_with_auth(
            "/quiz/start",
            &json!({ "topic": "underwater_basket_weaving" }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap_or_default().contains("unknown topic"));
}

#[tokio::test]
async fn test_answer_for_unknown_session() {
    let (router, state) = test_app();
    let client = TestClient::new(router);
    let token = jwt::create_test_token(Uuid::new_v4(), "learner@example.com", &state.jwt_secret);

    let response = client
        .post_json_with_auth(
            &format!("/quiz/answer?session_id={}", Uuid::new_v4()),
            &json!({ "question_id": Uuid::new_v4(), "selected_option_id": 1 }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid quiz session");
}

#[tokio::test]
async fn test_complete_for_unknown_session() {
    let (router, state) = test_app();
    let client = TestClient::new(router);
    let token = jwt::create_test_token(Uuid::new_v4(), "learner@example.com", &state.jwt_secret);

    let response = client
        .post_with_auth(&format!("/quiz/complete?session_id={}", Uuid::new_v4()), &token)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_session_id_rejected() {
    let (router, state) = test_app();
    let client = TestClient::new(router);
    let token = jwt::create_test_token(Uuid::new_v4(), "learner@example.com", &state.jwt_secret);

    let response = client
        .post_with_auth("/quiz/complete?session_id=not-a-uuid", &token)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_someone_elses_session_forbidden() {
    let (router, state) = test_app();
    let client = TestClient::new(router);

    // Session owned by one user, token issued for another
    let owner = Uuid::new_v4();
    let session_id = state
        .sessions
        .create(QuizSession::new(owner, "networking".to_string(), vec![]))
        .await;

    let intruder = Uuid::new_v4();
    let token = jwt::create_test_token(intruder, "intruder@example.com", &state.jwt_secret);

    let response = client
        .post_with_auth(&format!("/quiz/complete?session_id={session_id}"), &token)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // The session must survive the rejected attempt
    assert_eq!(state.sessions.len().await, 1);
}
