//! Database schema definitions for the assessment engine.
//!
//! Designed for:
//! - Fast inserts on the answer path (responses get minimal indexes)
//! - Fast per-user reads for analytics and history
//! - Data integrity (foreign keys and constraints)

/// SQL schema for learner profiles.
///
/// One row per user, holding the adaptive state the engine mutates after
/// every answer. `current_difficulty` always sits in `[1.0, 5.0]`.
pub const LEARNER_PROFILES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS learner_profiles (
    user_id UUID PRIMARY KEY,
    current_difficulty DOUBLE PRECISION NOT NULL DEFAULT 1.0,
    correct_streak INTEGER NOT NULL DEFAULT 0,
    total_questions INTEGER NOT NULL DEFAULT 0,
    correct_answers INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT chk_difficulty_range CHECK (current_difficulty BETWEEN 1.0 AND 5.0)
);
"#;

/// SQL schema for questions.
///
/// Multiple-choice questions carry a JSONB `options` array of exactly 4
/// entries plus `correct_option_id`; free-text questions leave both NULL.
pub const QUESTIONS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    created_by UUID,
    topic VARCHAR(100) NOT NULL,
    difficulty DOUBLE PRECISION NOT NULL,
    question_text TEXT NOT NULL,
    correct_answer TEXT NOT NULL,
    options JSONB,
    correct_option_id INTEGER,
    explanation TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Topic drives question selection for quiz starts
CREATE INDEX IF NOT EXISTS idx_questions_topic ON questions(topic);
"#;

/// SQL schema for answer records.
///
/// Immutable once written; the analytics endpoints aggregate over them.
pub const RESPONSES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS responses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    question_id UUID NOT NULL,
    user_answer TEXT NOT NULL,
    is_correct BOOLEAN NOT NULL,
    confidence_score DOUBLE PRECISION,
    feedback TEXT,
    difficulty_at_time DOUBLE PRECISION NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT fk_responses_question FOREIGN KEY (question_id) REFERENCES questions(id) ON DELETE CASCADE
);

-- Per-user aggregation and recent-history queries
CREATE INDEX IF NOT EXISTS idx_responses_user_id ON responses(user_id);
CREATE INDEX IF NOT EXISTS idx_responses_user_created ON responses(user_id, created_at DESC);
"#;
