use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// One answer choice of a multiple-choice question.
///
/// MCQ questions always carry exactly 4 of these with unique positive ids;
/// the generator enforces that shape before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Option id, unique within the question
    pub id: i32,
    /// Option text shown to the learner
    pub text: String,
}

/// Question model - either multiple-choice or free-text.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Question {
    /// Unique question identifier
    pub id: Uuid,
    /// User whose session triggered generation, if any (NULL for seeds)
    pub created_by: Option<Uuid>,
    /// Topic key the question belongs to
    pub topic: String,
    /// Difficulty the question was generated at
    pub difficulty: f64,
    /// The question text
    pub question_text: String,
    /// Canonical correct answer text
    pub correct_answer: String,
    /// The 4 answer options (NULL for free-text questions)
    pub options: Option<Json<Vec<QuestionOption>>>,
    /// Id of the correct option (NULL for free-text questions)
    pub correct_option_id: Option<i32>,
    /// Explanation shown after answering
    pub explanation: String,
    /// When the question was created
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    /// User whose session triggered generation, if any
    pub created_by: Option<Uuid>,
    /// Topic key
    pub topic: String,
    /// Difficulty at generation time
    pub difficulty: f64,
    /// Question text
    pub question_text: String,
    /// Canonical correct answer text
    pub correct_answer: String,
    /// Options for MCQ mode
    pub options: Option<Vec<QuestionOption>>,
    /// Correct option id for MCQ mode
    pub correct_option_id: Option<i32>,
    /// Explanation text
    pub explanation: String,
}

/// Answer record - immutable once created.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AnswerRecord {
    /// Unique record identifier
    pub id: Uuid,
    /// User who answered
    pub user_id: Uuid,
    /// Question that was answered
    pub question_id: Uuid,
    /// Submitted answer text or selected option id
    pub user_answer: String,
    /// Whether the answer was correct
    pub is_correct: bool,
    /// Evaluator confidence for free-text answers
    pub confidence_score: Option<f64>,
    /// Feedback text shown to the learner
    pub feedback: Option<String>,
    /// Difficulty in effect when answered
    pub difficulty_at_time: f64,
    /// When the answer was recorded
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new answer record.
#[derive(Debug, Clone)]
pub struct NewAnswerRecord {
    /// User who answered
    pub user_id: Uuid,
    /// Question that was answered
    pub question_id: Uuid,
    /// Submitted answer text or selected option id
    pub user_answer: String,
    /// Whether the answer was correct
    pub is_correct: bool,
    /// Evaluator confidence for free-text answers
    pub confidence_score: Option<f64>,
    /// Feedback text shown to the learner
    pub feedback: Option<String>,
    /// Difficulty in effect when answered
    pub difficulty_at_time: f64,
}

/// Learner profile - the adaptive state mutated after every answer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LearnerProfile {
    /// Owning user
    pub user_id: Uuid,
    /// Current difficulty, clamped to [1.0, 5.0]
    pub current_difficulty: f64,
    /// Consecutive correct answers, reset on any miss
    pub correct_streak: i32,
    /// Lifetime questions answered
    pub total_questions: i32,
    /// Lifetime correct answers
    pub correct_answers: i32,
}

/// One row of the recent answer history.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryEntry {
    /// Question text as shown to the learner
    pub question: String,
    /// What the learner submitted
    pub user_answer: String,
    /// Whether it was correct
    pub is_correct: bool,
    /// Difficulty in effect at the time
    pub difficulty: f64,
    /// When the answer was recorded
    pub created_at: DateTime<Utc>,
}
