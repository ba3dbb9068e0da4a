use axum::{Json, Router, response::IntoResponse, routing::get};
use rand::seq::SliceRandom;
use serde_json::json;

use crate::ApiState;

use super::model::{QuizTopic, catalog};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(get_all_topics))
        .route("/topics/random", get(get_random_topic))
}

/// Get the static topic catalog
async fn get_all_topics() -> impl IntoResponse {
    Json(json!({ "topics": catalog() }))
}

/// Suggest a random topic to practice
async fn get_random_topic() -> impl IntoResponse {
    let topics = catalog();
    // The catalog is never empty, but don't panic on the impossible
    let topic: Option<&QuizTopic> = topics.choose(&mut rand::thread_rng());
    Json(json!({ "topic": topic }))
}
