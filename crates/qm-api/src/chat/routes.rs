//! Free-text question flow.
//!
//! Unlike the quiz flow there is no session here: each question is
//! generated, answered, and scored independently. Scoring uses the
//! weighted policy (difficulty times 100 plus a speed bonus), which is
//! intentionally distinct from the quiz flow's flat 10 points.

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use chrono::Utc;

use qm_db::models::{NewAnswerRecord, NewQuestion};
use qm_db::repositories::{learners, questions, responses};
use qm_engine::{adaptive, feedback, scoring};

use crate::topic::model::{display_name, is_known_topic};
use crate::{ApiState, auth::AuthUser, error::ApiError};

use super::model::{AnswerRequest, AnswerResponse, ChatRequest, ChatResponse};

/// Create the chat routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/chat/message", post(send_message))
        .route("/chat/answer", post(submit_answer))
}

/// Generate a free-text question at the learner's current difficulty
async fn send_message(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if !is_known_topic(&payload.topic) {
        return Err(ApiError::Validation(format!(
            "unknown topic '{}'",
            payload.topic
        )));
    }

    let learner = learners::get_or_create(&state.pool, auth_user.user_id).await?;

    let generated = state
        .generator
        .generate_question(&payload.topic, learner.current_difficulty)
        .await
        .into_inner();

    let question = questions::insert(
        &state.pool,
        NewQuestion {
            created_by: Some(auth_user.user_id),
            topic: payload.topic.clone(),
            difficulty: learner.current_difficulty,
            question_text: generated.question,
            correct_answer: generated.answer,
            options: None,
            correct_option_id: None,
            explanation: generated.explanation,
        },
    )
    .await?;

    Ok(Json(ChatResponse {
        response: question.question_text,
        question_id: question.id,
        difficulty: learner.current_difficulty,
        is_question: true,
        topic: display_name(&payload.topic),
    }))
}

/// Evaluate a free-text answer
async fn submit_answer(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let question = questions::get_by_id(&state.pool, payload.question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;

    let evaluation = state
        .generator
        .evaluate_answer(&question.question_text, &question.correct_answer, &payload.answer)
        .await;

    let learner = learners::get_or_create(&state.pool, auth_user.user_id).await?;
    let new_streak = adaptive::update_streak(learner.correct_streak, evaluation.is_correct);
    let new_difficulty =
        adaptive::adjust_difficulty(learner.current_difficulty, evaluation.is_correct, new_streak);

    // Speed counts from when the question was generated
    let time_taken_secs = (Utc::now() - question.created_at).num_seconds();
    let points_earned =
        scoring::weighted_score(learner.current_difficulty, time_taken_secs, evaluation.is_correct);

    let feedback_text =
        feedback::generate_feedback(evaluation.is_correct, new_streak, &question.explanation);

    // Answer record and learner state commit atomically
    let mut tx = state.pool.begin().await?;
    responses::insert(
        &mut *tx,
        NewAnswerRecord {
            user_id: auth_user.user_id,
            question_id: question.id,
            user_answer: payload.answer,
            is_correct: evaluation.is_correct,
            confidence_score: Some(evaluation.confidence),
            feedback: Some(feedback_text.clone()),
            difficulty_at_time: learner.current_difficulty,
        },
    )
    .await?;
    learners::apply_answer(
        &mut *tx,
        auth_user.user_id,
        new_streak,
        new_difficulty,
        evaluation.is_correct,
    )
    .await?;
    tx.commit().await?;

    Ok(Json(AnswerResponse {
        is_correct: evaluation.is_correct,
        feedback: feedback_text,
        explanation: question.explanation,
        points_earned,
        new_difficulty,
        streak: new_streak,
    }))
}
