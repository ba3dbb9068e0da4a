//! Learner-facing feedback text.

/// Build the feedback shown after a free-text answer.
///
/// Correct answers get streak-aware encouragement ahead of the
/// explanation; incorrect answers get the explanation wrapped in a
/// consolation message.
pub fn generate_feedback(is_correct: bool, streak: i32, explanation: &str) -> String {
    if is_correct {
        let encouragement = if streak >= 5 {
            "🔥 Amazing streak! You're mastering this!"
        } else if streak >= 3 {
            "✨ Excellent work! Keep it up!"
        } else {
            "✅ Correct! Well done!"
        };
        format!("{encouragement}\n\n{explanation}")
    } else {
        format!(
            "❌ Not quite right. {explanation}\n\nDon't worry, learning from mistakes is part of the process!"
        )
    }
}

/// Map overall accuracy to one of four qualitative progress messages.
pub fn get_progress_message(accuracy: f64, total_questions: usize) -> String {
    if accuracy >= 90.0 {
        format!(
            "🌟 Outstanding! You've answered {total_questions} questions with {accuracy}% accuracy!"
        )
    } else if accuracy >= 75.0 {
        format!(
            "👍 Great job! You're doing well with {accuracy}% accuracy across {total_questions} questions."
        )
    } else if accuracy >= 60.0 {
        format!("📈 You're improving! Keep practicing to boost your {accuracy}% accuracy.")
    } else {
        format!("💪 Keep learning! Practice makes perfect. Current accuracy: {accuracy}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_streak_tiers() {
        assert!(generate_feedback(true, 1, "Because.").starts_with("✅"));
        assert!(generate_feedback(true, 3, "Because.").starts_with("✨"));
        assert!(generate_feedback(true, 5, "Because.").starts_with("🔥"));
    }

    #[test]
    fn test_feedback_carries_explanation() {
        let text = generate_feedback(false, 4, "TLS encrypts traffic.");
        assert!(text.contains("TLS encrypts traffic."));
        assert!(text.starts_with("❌"));
    }

    #[test]
    fn test_progress_message_tiers() {
        assert!(get_progress_message(95.0, 20).starts_with("🌟"));
        assert!(get_progress_message(80.0, 20).starts_with("👍"));
        assert!(get_progress_message(65.0, 20).starts_with("📈"));
        assert!(get_progress_message(40.0, 20).starts_with("💪"));
        // Boundaries belong to the upper tier
        assert!(get_progress_message(90.0, 1).starts_with("🌟"));
        assert!(get_progress_message(75.0, 1).starts_with("👍"));
        assert!(get_progress_message(60.0, 1).starts_with("📈"));
    }
}
