use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::models::LearnerProfile;

/// Fetch a learner profile, creating the default row on first contact.
///
/// New learners start at difficulty 1.0 with zeroed counters.
pub async fn get_or_create(pool: &PgPool, user_id: Uuid) -> Result<LearnerProfile, sqlx::Error> {
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO learner_profiles (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, current_difficulty, correct_streak, total_questions, correct_answers
            FROM learner_profiles
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Apply the post-answer update to a learner profile.
///
/// Writes the new streak and difficulty and bumps the lifetime counters in
/// one statement so the update is atomic with the surrounding transaction.
pub async fn apply_answer<'e, E>(
    executor: E,
    user_id: Uuid,
    new_streak: i32,
    new_difficulty: f64,
    is_correct: bool,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE learner_profiles
            SET correct_streak = $2,
                current_difficulty = $3,
                total_questions = total_questions + 1,
                correct_answers = correct_answers + CASE WHEN $4 THEN 1 ELSE 0 END,
                updated_at = NOW()
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(new_streak)
    .bind(new_difficulty)
    .bind(is_correct)
    .execute(executor)
    .await?;

    Ok(())
}
