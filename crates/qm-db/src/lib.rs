pub mod models;
pub mod repositories;
pub mod schema;
pub mod seed;

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Ensure all tables and indexes from [`schema`] exist.
///
/// Every statement is `IF NOT EXISTS`, so this is safe to run on every
/// startup.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    for statements in [
        schema::LEARNER_PROFILES_SCHEMA,
        schema::QUESTIONS_SCHEMA,
        schema::RESPONSES_SCHEMA,
    ] {
        sqlx::raw_sql(statements)
            .execute(pool)
            .await
            .context("failed to apply schema")?;
    }

    Ok(())
}
