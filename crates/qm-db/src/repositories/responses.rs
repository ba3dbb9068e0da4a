use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{HistoryEntry, NewAnswerRecord};

/// Persist an answer record. Records are immutable once written.
pub async fn insert<'e, E>(executor: E, record: NewAnswerRecord) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO responses
                (user_id, question_id, user_answer, is_correct,
                 confidence_score, feedback, difficulty_at_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
        "#,
    )
    .bind(record.user_id)
    .bind(record.question_id)
    .bind(&record.user_answer)
    .bind(record.is_correct)
    .bind(record.confidence_score)
    .bind(record.feedback.as_deref())
    .bind(record.difficulty_at_time)
    .fetch_one(executor)
    .await
}

/// Raw row feeding the performance analyzer: correctness, difficulty at
/// answer time, and the question's topic.
#[derive(Debug, sqlx::FromRow)]
pub struct PerformanceRow {
    /// Whether the answer was correct
    pub is_correct: bool,
    /// Difficulty in effect when answered
    pub difficulty: f64,
    /// Topic of the answered question
    pub topic: String,
}

/// All of a user's answers joined with their question topics, oldest
/// first so topic insertion order is deterministic for the analyzer.
pub async fn performance_rows<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<PerformanceRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT r.is_correct,
                   r.difficulty_at_time AS difficulty,
                   COALESCE(q.topic, 'unknown') AS topic
            FROM responses r
            LEFT JOIN questions q ON q.id = r.question_id
            WHERE r.user_id = $1
            ORDER BY r.created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Most recent answers with their question text, newest first.
pub async fn recent_history<'e, E>(
    executor: E,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<HistoryEntry>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT COALESCE(q.question_text, 'N/A') AS question,
                   r.user_answer,
                   r.is_correct,
                   r.difficulty_at_time AS difficulty,
                   r.created_at
            FROM responses r
            LEFT JOIN questions q ON q.id = r.question_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Lifetime totals for the progress summary: (total answers, correct answers).
pub async fn answer_totals<'e, E>(executor: E, user_id: Uuid) -> Result<(i64, i64), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE is_correct)
            FROM responses
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
}

/// Distinct topics the user has answered questions in.
pub async fn touched_topics<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT DISTINCT q.topic
            FROM responses r
            JOIN questions q ON q.id = r.question_id
            WHERE r.user_id = $1
            ORDER BY q.topic
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
