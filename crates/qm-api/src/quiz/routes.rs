use axum::{
    Json, Router,
    extract::{Query, State},
    routing::post,
};

use crate::{ApiState, auth::AuthUser, error::ApiError};

use super::model::{
    QuizAnswerResult, QuizAnswerSubmit, QuizSessionComplete, QuizSessionStart, QuizStartRequest,
    SessionQuery,
};
use super::service;

/// Create the quiz routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/quiz/start", post(start_quiz))
        .route("/quiz/answer", post(submit_quiz_answer))
        .route("/quiz/complete", post(complete_quiz))
}

/// Start a new quiz session
async fn start_quiz(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<QuizStartRequest>,
) -> Result<Json<QuizSessionStart>, ApiError> {
    let response = service::start_quiz(&state, auth_user.user_id, payload).await?;
    Ok(Json(response))
}

/// Submit an answer to a quiz question
async fn submit_quiz_answer(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<SessionQuery>,
    Json(payload): Json<QuizAnswerSubmit>,
) -> Result<Json<QuizAnswerResult>, ApiError> {
    let response =
        service::submit_answer(&state, auth_user.user_id, query.session_id, payload).await?;
    Ok(Json(response))
}

/// Complete a quiz session and get results
async fn complete_quiz(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<QuizSessionComplete>, ApiError> {
    let response = service::complete_quiz(&state, auth_user.user_id, query.session_id).await?;
    Ok(Json(response))
}
