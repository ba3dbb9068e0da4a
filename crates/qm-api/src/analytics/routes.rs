//! Performance analytics over persisted answer records.
//!
//! Operates on the answer-record store, not on live sessions: a quiz in
//! progress shows up here as soon as its answers are persisted.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use qm_db::repositories::responses;
use qm_engine::feedback::get_progress_message;
use qm_engine::scoring::{AnswerSignal, analyze_performance};

use crate::{ApiState, auth::AuthUser, error::ApiError};

/// Create the analytics routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/analytics/performance", get(get_performance_analytics))
        .route("/analytics/history", get(get_answer_history))
}

/// Get detailed performance analytics
async fn get_performance_analytics(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = responses::performance_rows(&state.pool, auth_user.user_id).await?;

    if rows.is_empty() {
        return Ok(Json(json!({
            "message": "No data yet. Start answering questions!",
            "total_questions": 0,
            "accuracy": 0.0,
            "average_difficulty": 0.0,
            "strongest_topics": [],
            "weakest_topics": [],
        })));
    }

    let signals: Vec<AnswerSignal> = rows
        .into_iter()
        .map(|row| AnswerSignal {
            is_correct: row.is_correct,
            difficulty: row.difficulty,
            topic: row.topic,
        })
        .collect();

    let report = analyze_performance(&signals);
    let message = get_progress_message(report.accuracy, report.total_questions);

    Ok(Json(json!({
        "message": message,
        "total_questions": report.total_questions,
        "accuracy": report.accuracy,
        "average_difficulty": report.average_difficulty,
        "strongest_topics": report.strongest_topics,
        "weakest_topics": report.weakest_topics,
    })))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    limit: i64,
}

const fn default_history_limit() -> i64 {
    20
}

/// Get recent answer history
async fn get_answer_history(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.clamp(1, 100);
    let history = responses::recent_history(&state.pool, auth_user.user_id, limit).await?;
    Ok(Json(history))
}
