//! Quiz session controller.
//!
//! Orchestrates the session state machine: `start` creates a session in
//! the registry, `submit_answer` runs one answer through the difficulty
//! adapter and the fixed-award scoring policy, `complete` tears the
//! session down and returns the summary. An answer holds its session's
//! lock from the ownership check through the database commit and the
//! cursor/score update, so a concurrent `complete` or eviction sweep
//! cannot split the update in half: either the whole answer applies or
//! none of it does.

use chrono::Utc;
use uuid::Uuid;

use qm_db::models::{NewAnswerRecord, NewQuestion, Question};
use qm_db::repositories::{learners, questions, responses};
use qm_engine::{AnswerOutcome, QuizSession, adaptive, scoring};

use crate::error::ApiError;
use crate::metrics;
use crate::state::ApiState;
use crate::topic::model::is_known_topic;

use super::model::{
    QuizAnswerResult, QuizAnswerSubmit, QuizQuestion, QuizSessionComplete, QuizSessionStart,
    QuizStartRequest,
};

/// Maximum questions per session.
const MAX_QUESTIONS: i64 = 50;

/// Start a new quiz session for a user.
///
/// Pulls stored multiple-choice questions for the topic; when the bank
/// holds fewer than requested, the remainder is generated at the
/// learner's current difficulty (fallback content when the AI
/// collaborator is unavailable - this path never fails the start).
pub async fn start_quiz(
    state: &ApiState,
    user_id: Uuid,
    request: QuizStartRequest,
) -> Result<QuizSessionStart, ApiError> {
    if !(1..=MAX_QUESTIONS).contains(&request.number_of_questions) {
        return Err(ApiError::Validation(format!(
            "number_of_questions must be between 1 and {MAX_QUESTIONS}"
        )));
    }
    if !is_known_topic(&request.topic) {
        return Err(ApiError::Validation(format!(
            "unknown topic '{}'",
            request.topic
        )));
    }

    let learner = learners::get_or_create(&state.pool, user_id).await?;

    let mut questions =
        questions::pick_mcq_for_topic(&state.pool, &request.topic, request.number_of_questions)
            .await?;

    // Not enough stored questions: generate and persist the remainder
    while questions.len() < request.number_of_questions as usize {
        let mcq = state
            .generator
            .generate_mcq(&request.topic, learner.current_difficulty)
            .await
            .into_inner();

        let question = questions::insert(
            &state.pool,
            NewQuestion {
                created_by: Some(user_id),
                topic: request.topic.clone(),
                difficulty: learner.current_difficulty,
                question_text: mcq.question,
                correct_answer: mcq.answer,
                options: Some(mcq.options),
                correct_option_id: Some(mcq.correct_option_id),
                explanation: mcq.explanation,
            },
        )
        .await?;
        questions.push(question);
    }

    let Some(first) = questions.first() else {
        // Unreachable given the count check, but don't panic on it
        return Err(ApiError::Validation("no questions available".to_string()));
    };
    let first_question = format_question(first, learner.current_difficulty, 1, questions.len());

    let question_ids = questions.iter().map(|q| q.id).collect();
    let session_id = state
        .sessions
        .create(QuizSession::new(user_id, request.topic.clone(), question_ids))
        .await;
    metrics::record_session_event("started");
    tracing::debug!(%session_id, topic = %request.topic, "quiz session started");

    Ok(QuizSessionStart {
        session_id,
        topic: request.topic,
        difficulty_level: learner.current_difficulty,
        first_question,
        total_questions: questions.len(),
    })
}

/// Submit one answer for a session.
///
/// Requires the caller to own the session. Correctness is option-id
/// equality; the difficulty adapter and fixed-award policy run on the
/// result, the answer record and learner update commit in one
/// transaction, then the session cursor and score advance. The session
/// lock is held for the whole call, so a concurrent `complete` waits and
/// still sees this answer, instead of tearing the session down between
/// the commit and the cursor update.
pub async fn submit_answer(
    state: &ApiState,
    user_id: Uuid,
    session_id: Uuid,
    submission: QuizAnswerSubmit,
) -> Result<QuizAnswerResult, ApiError> {
    let mut session = state.sessions.lock(session_id).await?;
    if session.user_id != user_id {
        return Err(ApiError::Forbidden);
    }

    let question = questions::get_by_id(&state.pool, submission.question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;
    let correct_option_id = question
        .correct_option_id
        .ok_or_else(|| ApiError::Validation("not a multiple-choice question".to_string()))?;

    let is_correct = submission.selected_option_id == correct_option_id;

    let learner = learners::get_or_create(&state.pool, user_id).await?;
    let new_streak = adaptive::update_streak(learner.correct_streak, is_correct);
    let new_difficulty =
        adaptive::adjust_difficulty(learner.current_difficulty, is_correct, new_streak);
    let points_earned = scoring::fixed_award(is_correct);

    // Answer record and learner state commit atomically
    let mut tx = state.pool.begin().await?;
    responses::insert(
        &mut *tx,
        NewAnswerRecord {
            user_id,
            question_id: question.id,
            user_answer: submission.selected_option_id.to_string(),
            is_correct,
            confidence_score: None,
            feedback: Some(if is_correct { "Correct!" } else { "Incorrect!" }.to_string()),
            difficulty_at_time: learner.current_difficulty,
        },
    )
    .await?;
    learners::apply_answer(&mut *tx, user_id, new_streak, new_difficulty, is_correct).await?;
    tx.commit().await?;

    session.answers.push(AnswerOutcome {
        question_id: question.id,
        selected_option_id: submission.selected_option_id,
        is_correct,
        points: points_earned,
    });
    session.current_index += 1;
    session.score += points_earned;

    let current_score = session.score;
    let current_index = session.current_index;
    let total = session.question_ids.len();
    let next_question_id = session.question_ids.get(current_index).copied();
    drop(session);

    let quiz_complete = current_index >= total;
    let next_question = match next_question_id {
        Some(next_id) => questions::get_by_id(&state.pool, next_id)
            .await?
            .map(|q| format_question(&q, new_difficulty, current_index + 1, total)),
        None => None,
    };

    Ok(QuizAnswerResult {
        question_id: question.id,
        is_correct,
        correct_option_id,
        explanation: question.explanation,
        points_earned,
        current_score,
        current_streak: new_streak,
        new_difficulty,
        next_question,
        quiz_complete,
    })
}

/// Complete a session: compute the summary and remove it from the
/// registry. The id is invalid afterwards.
pub async fn complete_quiz(
    state: &ApiState,
    user_id: Uuid,
    session_id: Uuid,
) -> Result<QuizSessionComplete, ApiError> {
    let session = state.sessions.get(session_id).await?;
    if session.user_id != user_id {
        return Err(ApiError::Forbidden);
    }

    // Fetch the profile before the terminal removal so a database failure
    // leaves the session intact and the call retryable
    let learner = learners::get_or_create(&state.pool, user_id).await?;

    let session = state.sessions.remove(session_id).await?;
    metrics::record_session_event("completed");

    let answered = session.answers.len();
    let correct_answers = session.answers.iter().filter(|a| a.is_correct).count();
    let incorrect_answers = answered - correct_answers;
    let score_percentage = if answered == 0 {
        0.0
    } else {
        correct_answers as f64 / answered as f64 * 100.0
    };
    let time_taken_seconds = (Utc::now() - session.started_at).num_seconds();
    tracing::debug!(%session_id, answered, correct_answers, "quiz session completed");

    Ok(QuizSessionComplete {
        session_id,
        topic: session.topic,
        total_questions: answered,
        correct_answers,
        incorrect_answers,
        score_percentage,
        time_taken_seconds,
        final_difficulty: learner.current_difficulty,
        questions_data: session.answers,
    })
}

fn format_question(
    question: &Question,
    difficulty: f64,
    question_number: usize,
    total_questions: usize,
) -> QuizQuestion {
    QuizQuestion {
        question_id: question.id,
        question_text: question.question_text.clone(),
        options: question
            .options
            .as_ref()
            .map(|json| json.0.clone())
            .unwrap_or_default(),
        topic: question.topic.clone(),
        difficulty,
        question_number,
        total_questions,
    }
}
