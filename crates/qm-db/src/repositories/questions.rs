use sqlx::types::Json;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{NewQuestion, Question};

/// Insert a question and return the stored row.
pub async fn insert<'e, E>(executor: E, question: NewQuestion) -> Result<Question, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO questions
                (created_by, topic, difficulty, question_text, correct_answer,
                 options, correct_option_id, explanation)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, created_by, topic, difficulty, question_text, correct_answer,
                      options, correct_option_id, explanation, created_at
        "#,
    )
    .bind(question.created_by)
    .bind(&question.topic)
    .bind(question.difficulty)
    .bind(&question.question_text)
    .bind(&question.correct_answer)
    .bind(question.options.map(Json))
    .bind(question.correct_option_id)
    .bind(&question.explanation)
    .fetch_one(executor)
    .await
}

/// Fetch a question by id.
pub async fn get_by_id<'e, E>(
    executor: E,
    question_id: Uuid,
) -> Result<Option<Question>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, created_by, topic, difficulty, question_text, correct_answer,
                   options, correct_option_id, explanation, created_at
            FROM questions
            WHERE id = $1
        "#,
    )
    .bind(question_id)
    .fetch_optional(executor)
    .await
}

/// Pick up to `limit` random multiple-choice questions for a topic.
///
/// Free-text questions (no options) are excluded; they belong to the chat
/// flow only.
pub async fn pick_mcq_for_topic<'e, E>(
    executor: E,
    topic: &str,
    limit: i64,
) -> Result<Vec<Question>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, created_by, topic, difficulty, question_text, correct_answer,
                   options, correct_option_id, explanation, created_at
            FROM questions
            WHERE topic = $1 AND options IS NOT NULL AND correct_option_id IS NOT NULL
            ORDER BY RANDOM()
            LIMIT $2
        "#,
    )
    .bind(topic)
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Number of stored questions, used to decide whether to seed.
pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*) FROM questions
        "#,
    )
    .fetch_one(executor)
    .await
}
