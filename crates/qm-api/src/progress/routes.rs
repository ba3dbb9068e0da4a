use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use qm_db::repositories::responses;
use qm_engine::scoring::calculate_accuracy;

use crate::{ApiState, auth::AuthUser, error::ApiError};

/// Create the progress routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/progress/summary", get(get_progress_summary))
}

/// Lifetime progress overview.
#[derive(Debug, Serialize)]
struct ProgressSummary {
    /// Questions answered in total
    total_questions: i64,
    /// How many were correct
    correct_answers: i64,
    /// Percentage correct, rounded to 2 decimals
    accuracy: f64,
    /// Topics the user has touched
    topics: Vec<String>,
}

/// Get the user's overall progress summary
async fn get_progress_summary(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<ProgressSummary>, ApiError> {
    let (total_questions, correct_answers) =
        responses::answer_totals(&state.pool, auth_user.user_id).await?;
    let topics = responses::touched_topics(&state.pool, auth_user.user_id).await?;

    Ok(Json(ProgressSummary {
        total_questions,
        correct_answers,
        accuracy: calculate_accuracy(correct_answers, total_questions),
        topics,
    }))
}
