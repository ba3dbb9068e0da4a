use serde::{Deserialize, Serialize};
use uuid::Uuid;

use qm_db::models::QuestionOption;
use qm_engine::AnswerOutcome;

/// Request to start a quiz session.
#[derive(Debug, Deserialize)]
pub struct QuizStartRequest {
    /// Topic to draw questions from
    pub topic: String,
    /// Number of questions, 1 to 50
    #[serde(default = "default_question_count")]
    pub number_of_questions: i64,
}

const fn default_question_count() -> i64 {
    5
}

/// One question as presented to the learner (no correct answer included).
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    /// Question id to submit the answer against
    pub question_id: Uuid,
    /// Question text
    pub question_text: String,
    /// The 4 answer options
    pub options: Vec<QuestionOption>,
    /// Topic of the session
    pub topic: String,
    /// Learner difficulty at presentation time
    pub difficulty: f64,
    /// 1-based position within the session
    pub question_number: usize,
    /// Session length
    pub total_questions: usize,
}

/// Response to a successful quiz start.
#[derive(Debug, Serialize)]
pub struct QuizSessionStart {
    /// Handle for answer/complete calls
    pub session_id: Uuid,
    /// Topic of the session
    pub topic: String,
    /// Learner difficulty at session start
    pub difficulty_level: f64,
    /// The first question
    pub first_question: QuizQuestion,
    /// Session length
    pub total_questions: usize,
}

/// Answer submission payload.
#[derive(Debug, Deserialize)]
pub struct QuizAnswerSubmit {
    /// Question being answered
    pub question_id: Uuid,
    /// Option the learner picked
    pub selected_option_id: i32,
}

/// Result of one answered question.
#[derive(Debug, Serialize)]
pub struct QuizAnswerResult {
    /// Question that was answered
    pub question_id: Uuid,
    /// Whether the pick was correct
    pub is_correct: bool,
    /// The correct option, revealed after answering
    pub correct_option_id: i32,
    /// Explanation of the correct answer
    pub explanation: String,
    /// Points from the fixed-award policy
    pub points_earned: i32,
    /// Session score so far
    pub current_score: i32,
    /// Streak after this answer
    pub current_streak: i32,
    /// Difficulty after this answer
    pub new_difficulty: f64,
    /// Next question, absent once the session is done
    pub next_question: Option<QuizQuestion>,
    /// True when the last question was just answered
    pub quiz_complete: bool,
}

/// Final summary returned by `complete`.
#[derive(Debug, Serialize)]
pub struct QuizSessionComplete {
    /// The completed (and now removed) session
    pub session_id: Uuid,
    /// Topic of the session
    pub topic: String,
    /// Questions actually answered
    pub total_questions: usize,
    /// Correct answers
    pub correct_answers: usize,
    /// Incorrect answers
    pub incorrect_answers: usize,
    /// Percentage correct, 0 when nothing was answered
    pub score_percentage: f64,
    /// Wall-clock session length in whole seconds
    pub time_taken_seconds: i64,
    /// Learner difficulty after the session
    pub final_difficulty: f64,
    /// Per-question outcomes in answer order
    pub questions_data: Vec<AnswerOutcome>,
}

/// Query parameter carrying the session handle.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    /// Session to operate on
    pub session_id: Uuid,
}
