//! AI question generation with deterministic fallback.
//!
//! The generator talks to the Anthropic Messages API through `reqwest`
//! with a bounded timeout. Every failure mode - missing API key, network
//! error, timeout, non-success status, malformed or invalid JSON - is
//! absorbed here and answered with canned content from [`fallback`], so
//! generation never raises to a caller. The [`Generation`] wrapper records
//! which path produced the content, for logging and metrics only.

pub mod fallback;

use std::time::Duration;

use qm_db::models::QuestionOption;
use serde::Deserialize;
use thiserror::Error;

use crate::metrics;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const GENERATION_MODEL: &str = "claude-sonnet-4-20250514";

/// A generated free-text question.
#[derive(Debug, Clone, Deserialize)]
pub struct FreeTextQuestion {
    /// Question text
    pub question: String,
    /// Canonical correct answer
    pub answer: String,
    /// Explanation shown after answering
    pub explanation: String,
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, Deserialize)]
pub struct McqQuestion {
    /// Question text
    pub question: String,
    /// Exactly 4 options with unique positive ids
    pub options: Vec<QuestionOption>,
    /// Id of the correct option
    pub correct_option_id: i32,
    /// Text of the correct option (derived when the model omits it)
    #[serde(default)]
    pub answer: String,
    /// Explanation shown after answering
    pub explanation: String,
}

/// Verdict on a free-text answer.
#[derive(Debug, Clone, Deserialize)]
pub struct Evaluation {
    /// Whether the answer counts as correct
    pub is_correct: bool,
    /// Feedback text for the learner
    pub feedback: String,
    /// Evaluator confidence in [0.0, 1.0]
    pub confidence: f64,
}

/// Content plus its provenance: real AI output or canned fallback.
#[derive(Debug, Clone)]
pub enum Generation<T> {
    /// Produced by the AI collaborator
    Generated(T),
    /// Served from the deterministic fallback catalog
    Fallback(T),
}

impl<T> Generation<T> {
    /// Whether this came from the fallback catalog.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Unwrap the content, discarding provenance.
    pub fn into_inner(self) -> T {
        match self {
            Self::Generated(inner) | Self::Fallback(inner) => inner,
        }
    }
}

#[derive(Debug, Error)]
enum GenerationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("empty response content")]
    Empty,
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid question shape: {0}")]
    InvalidShape(&'static str),
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Client for the external question-generation collaborator.
///
/// Without an API key it serves fallback content only and performs no
/// network I/O.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl QuestionGenerator {
    /// Build a generator. `timeout` bounds every generation call.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        if api_key.is_none() {
            tracing::warn!("ANTHROPIC_API_KEY not configured, serving fallback questions only");
        }
        Self { client, api_key }
    }

    /// Generate a free-text question for a topic at a difficulty.
    pub async fn generate_question(
        &self,
        topic: &str,
        difficulty: f64,
    ) -> Generation<FreeTextQuestion> {
        let prompt = free_text_prompt(topic, difficulty);
        let result = match self.complete(&prompt, 1000).await {
            Ok(text) => parse_free_text(&text),
            Err(err) => Err(err),
        };

        let generation = match result {
            Ok(question) => Generation::Generated(question),
            Err(err) => {
                tracing::warn!(topic, "AI generation failed, using fallback: {err}");
                Generation::Fallback(fallback::free_text(topic))
            }
        };
        metrics::record_generation("free_text", generation.is_fallback());
        generation
    }

    /// Generate a multiple-choice question with exactly 4 options.
    ///
    /// Model output that does not validate to the fixed MCQ shape is
    /// discarded in favor of the fallback, never stored.
    pub async fn generate_mcq(&self, topic: &str, difficulty: f64) -> Generation<McqQuestion> {
        let prompt = mcq_prompt(topic, difficulty);
        let result = match self.complete(&prompt, 1000).await {
            Ok(text) => parse_mcq(&text),
            Err(err) => Err(err),
        };

        let generation = match result {
            Ok(question) => Generation::Generated(question),
            Err(err) => {
                tracing::warn!(topic, "AI MCQ generation failed, using fallback: {err}");
                Generation::Fallback(fallback::mcq(topic))
            }
        };
        metrics::record_generation("mcq", generation.is_fallback());
        generation
    }

    /// Evaluate a free-text answer against the stored correct answer.
    pub async fn evaluate_answer(
        &self,
        question: &str,
        correct_answer: &str,
        user_answer: &str,
    ) -> Evaluation {
        let prompt = evaluation_prompt(question, correct_answer, user_answer);
        let result = match self.complete(&prompt, 500).await {
            Ok(text) => {
                strip_code_fences(&text).and_then(|json| Ok(serde_json::from_str(json)?))
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(evaluation) => evaluation,
            Err(err) => {
                tracing::warn!("AI evaluation failed, using fallback: {err}");
                fallback_evaluation(correct_answer, user_answer)
            }
        }
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        let Some(api_key) = &self.api_key else {
            return Err(GenerationError::Empty);
        };

        let body = serde_json::json!({
            "model": GENERATION_MODEL,
            "max_tokens": max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::Status(response.status()));
        }

        let message: MessagesResponse = response.json().await?;
        message
            .content
            .first()
            .map(|block| block.text.clone())
            .filter(|text| !text.is_empty())
            .ok_or(GenerationError::Empty)
    }
}

/// Human description of a difficulty value, used in prompts.
fn difficulty_descriptor(difficulty: f64) -> &'static str {
    if difficulty < 1.5 {
        "beginner-level"
    } else if difficulty < 2.5 {
        "intermediate-level"
    } else if difficulty < 3.5 {
        "advanced-level"
    } else {
        "expert-level"
    }
}

fn topic_words(topic: &str) -> String {
    topic.replace('_', " ")
}

fn free_text_prompt(topic: &str, difficulty: f64) -> String {
    format!(
        "Generate a {descriptor} technical question about {topic}.\n\n\
         Difficulty level: {difficulty}/5.0\n\n\
         Provide:\n\
         1. A clear, engaging question\n\
         2. The correct answer\n\
         3. A detailed explanation\n\n\
         Respond with JSON only:\n\
         {{\n    \"question\": \"...\",\n    \"answer\": \"...\",\n    \"explanation\": \"...\"\n}}",
        descriptor = difficulty_descriptor(difficulty),
        topic = topic_words(topic),
    )
}

fn mcq_prompt(topic: &str, difficulty: f64) -> String {
    format!(
        "Generate a {descriptor} multiple-choice question about {topic}.\n\n\
         Difficulty level: {difficulty}/5.0\n\n\
         Create exactly 4 unique options. Only ONE must be correct.\n\n\
         Respond with JSON only:\n\
         {{\n    \"question\": \"What is...?\",\n    \"options\": [\n        {{\"id\": 1, \"text\": \"Option A\"}},\n        {{\"id\": 2, \"text\": \"Option B\"}},\n        {{\"id\": 3, \"text\": \"Option C\"}},\n        {{\"id\": 4, \"text\": \"Option D\"}}\n    ],\n    \"correct_option_id\": 1,\n    \"explanation\": \"Why the correct option is right and the others are wrong\"\n}}",
        descriptor = difficulty_descriptor(difficulty),
        topic = topic_words(topic),
    )
}

fn evaluation_prompt(question: &str, correct_answer: &str, user_answer: &str) -> String {
    format!(
        "Evaluate this answer to a technical question.\n\n\
         Question: {question}\n\
         Correct Answer: {correct_answer}\n\
         User's Answer: {user_answer}\n\n\
         Respond with JSON only:\n\
         {{\n    \"is_correct\": true,\n    \"confidence\": 0.85,\n    \"feedback\": \"...\"\n}}"
    )
}

fn parse_free_text(text: &str) -> Result<FreeTextQuestion, GenerationError> {
    let json = strip_code_fences(text)?;
    let question: FreeTextQuestion = serde_json::from_str(json)?;
    if question.question.is_empty() || question.answer.is_empty() {
        return Err(GenerationError::InvalidShape("empty question or answer"));
    }
    Ok(question)
}

fn parse_mcq(text: &str) -> Result<McqQuestion, GenerationError> {
    let json = strip_code_fences(text)?;
    let mut question: McqQuestion = serde_json::from_str(json)?;
    validate_mcq(&question)?;

    // Models sometimes omit the flat answer field; derive it
    if question.answer.is_empty() {
        question.answer = question
            .options
            .iter()
            .find(|o| o.id == question.correct_option_id)
            .map(|o| o.text.clone())
            .unwrap_or_default();
    }
    Ok(question)
}

/// Enforce the fixed MCQ shape before anything reaches a session:
/// exactly 4 options, unique positive ids, non-empty texts, and a correct
/// id that resolves.
fn validate_mcq(question: &McqQuestion) -> Result<(), GenerationError> {
    if question.question.is_empty() {
        return Err(GenerationError::InvalidShape("empty question text"));
    }
    if question.options.len() != 4 {
        return Err(GenerationError::InvalidShape("expected exactly 4 options"));
    }
    if question.options.iter().any(|o| o.id <= 0 || o.text.is_empty()) {
        return Err(GenerationError::InvalidShape(
            "options need positive ids and non-empty text",
        ));
    }
    for (i, option) in question.options.iter().enumerate() {
        if question.options[..i].iter().any(|other| other.id == option.id) {
            return Err(GenerationError::InvalidShape("duplicate option id"));
        }
    }
    if !question
        .options
        .iter()
        .any(|o| o.id == question.correct_option_id)
    {
        return Err(GenerationError::InvalidShape(
            "correct_option_id not among options",
        ));
    }
    Ok(())
}

/// Models often wrap JSON in a markdown code fence; strip it.
fn strip_code_fences(text: &str) -> Result<&str, GenerationError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map_or(trimmed, |rest| rest.trim_end_matches("```"));
    let inner = inner.trim();
    if inner.is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(inner)
}

/// Keyword containment check used when the AI evaluator is unavailable.
fn fallback_evaluation(correct_answer: &str, user_answer: &str) -> Evaluation {
    let is_correct = user_answer
        .to_lowercase()
        .contains(&correct_answer.to_lowercase());
    Evaluation {
        is_correct,
        feedback: if is_correct {
            "Good job!".to_string()
        } else {
            "Not quite right. Review the explanation.".to_string()
        },
        confidence: if is_correct { 0.7 } else { 0.3 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq_json(options: &str, correct: i32) -> String {
        format!(
            r#"{{"question": "Q?", "options": {options}, "correct_option_id": {correct}, "explanation": "E"}}"#
        )
    }

    const FOUR_OPTIONS: &str = r#"[
        {"id": 1, "text": "a"}, {"id": 2, "text": "b"},
        {"id": 3, "text": "c"}, {"id": 4, "text": "d"}]"#;

    #[test]
    fn test_parse_mcq_accepts_valid_shape() {
        let question = parse_mcq(&mcq_json(FOUR_OPTIONS, 2)).unwrap();
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.correct_option_id, 2);
        // answer derived from the correct option
        assert_eq!(question.answer, "b");
    }

    #[test]
    fn test_parse_mcq_rejects_wrong_option_count() {
        let three = r#"[{"id": 1, "text": "a"}, {"id": 2, "text": "b"}, {"id": 3, "text": "c"}]"#;
        assert!(parse_mcq(&mcq_json(three, 1)).is_err());
    }

    #[test]
    fn test_parse_mcq_rejects_duplicate_ids() {
        let dupes = r#"[
            {"id": 1, "text": "a"}, {"id": 1, "text": "b"},
            {"id": 3, "text": "c"}, {"id": 4, "text": "d"}]"#;
        assert!(parse_mcq(&mcq_json(dupes, 1)).is_err());
    }

    #[test]
    fn test_parse_mcq_rejects_dangling_correct_id() {
        assert!(parse_mcq(&mcq_json(FOUR_OPTIONS, 9)).is_err());
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\": 1}").unwrap(), "{\"a\": 1}");
        assert_eq!(
            strip_code_fences("```json\n{\"a\": 1}\n```").unwrap(),
            "{\"a\": 1}"
        );
        assert_eq!(strip_code_fences("```\n{}\n```").unwrap(), "{}");
        assert!(strip_code_fences("   ").is_err());
    }

    #[test]
    fn test_fallback_evaluation_containment() {
        let hit = fallback_evaluation("AES", "I believe it is aes");
        assert!(hit.is_correct);
        assert_eq!(hit.confidence, 0.7);

        let miss = fallback_evaluation("AES", "RSA probably");
        assert!(!miss.is_correct);
        assert_eq!(miss.confidence, 0.3);
    }

    #[test]
    fn test_difficulty_descriptor_bands() {
        assert_eq!(difficulty_descriptor(1.0), "beginner-level");
        assert_eq!(difficulty_descriptor(1.5), "intermediate-level");
        assert_eq!(difficulty_descriptor(2.5), "advanced-level");
        assert_eq!(difficulty_descriptor(3.5), "expert-level");
        assert_eq!(difficulty_descriptor(5.0), "expert-level");
    }

    #[tokio::test]
    async fn test_generator_without_key_serves_fallback() {
        let generator = QuestionGenerator::new(None, Duration::from_secs(1));

        let mcq = generator.generate_mcq("cryptography", 2.0).await;
        assert!(mcq.is_fallback());
        assert_eq!(mcq.into_inner().options.len(), 4);

        let free = generator.generate_question("networking", 2.0).await;
        assert!(free.is_fallback());

        let evaluation = generator.evaluate_answer("Q?", "TCP", "tcp of course").await;
        assert!(evaluation.is_correct);
    }
}
