use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for a new free-text question.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Topic to ask about; defaults to the starter topic
    #[serde(default = "default_topic")]
    pub topic: String,
}

fn default_topic() -> String {
    crate::generator::fallback::DEFAULT_TOPIC.to_string()
}

/// A freshly generated free-text question.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The question text
    pub response: String,
    /// Id to submit the answer against
    pub question_id: Uuid,
    /// Learner difficulty the question was generated at
    pub difficulty: f64,
    /// Always true; kept for client compatibility
    pub is_question: bool,
    /// Topic display name
    pub topic: String,
}

/// Free-text answer submission.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Question being answered
    pub question_id: Uuid,
    /// The learner's answer text
    pub answer: String,
}

/// Evaluation of a free-text answer.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// Whether the evaluator judged the answer correct
    pub is_correct: bool,
    /// Streak-aware feedback text
    pub feedback: String,
    /// Explanation of the correct answer
    pub explanation: String,
    /// Points under the weighted policy (difficulty and speed)
    pub points_earned: i64,
    /// Difficulty after this answer
    pub new_difficulty: f64,
    /// Streak after this answer
    pub streak: i32,
}
