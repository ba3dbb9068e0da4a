//! Adaptive difficulty adjustment.
//!
//! Difficulty is a real-valued knob in `[1.0, 5.0]` that drives question
//! generation and the weighted scoring policy. It moves up on correct
//! answers (faster when the learner is on a streak) and down on incorrect
//! ones, and is always clamped and rounded to one decimal place.

/// Lower bound of the difficulty scale.
pub const MIN_DIFFICULTY: f64 = 1.0;

/// Upper bound of the difficulty scale.
pub const MAX_DIFFICULTY: f64 = 5.0;

/// Update the consecutive-correct streak for one answer.
///
/// Any incorrect answer resets the streak to zero, regardless of how long
/// it was. The returned value is the streak that must be fed into
/// [`adjust_difficulty`] for the same answer.
pub fn update_streak(current_streak: i32, is_correct: bool) -> i32 {
    if is_correct { current_streak + 1 } else { 0 }
}

/// Compute the next difficulty after one answer.
///
/// # Arguments
///
/// * `current` - Difficulty in effect when the question was answered
/// * `is_correct` - Whether the answer was correct
/// * `streak` - The *post-update* streak, i.e. the result of
///   [`update_streak`] for this same answer
///
/// # Algorithm
///
/// * Correct with streak >= 3: +0.3
/// * Correct with streak >= 2: +0.2
/// * Correct otherwise: +0.1
/// * Incorrect: -0.2
///
/// The result is clamped to `[1.0, 5.0]` and rounded to one decimal place.
/// This function is pure and never fails.
pub fn adjust_difficulty(current: f64, is_correct: bool, streak: i32) -> f64 {
    let next = if is_correct {
        let increase = if streak >= 3 {
            0.3
        } else if streak >= 2 {
            0.2
        } else {
            0.1
        };
        current + increase
    } else {
        current - 0.2
    };

    round_difficulty(next.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY))
}

/// Round a difficulty value to one decimal place.
fn round_difficulty(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_streak() {
        assert_eq!(update_streak(0, true), 1);
        assert_eq!(update_streak(4, true), 5);
        assert_eq!(update_streak(0, false), 0);
        assert_eq!(update_streak(7, false), 0);
    }

    #[test]
    fn test_increase_tiers_follow_streak() {
        // No streak yet: +0.1
        assert_eq!(adjust_difficulty(2.0, true, 1), 2.1);
        // Two in a row: +0.2
        assert_eq!(adjust_difficulty(2.0, true, 2), 2.2);
        // Three or more: +0.3
        assert_eq!(adjust_difficulty(2.0, true, 3), 2.3);
        assert_eq!(adjust_difficulty(2.0, true, 10), 2.3);
    }

    #[test]
    fn test_decrease_on_incorrect() {
        assert_eq!(adjust_difficulty(3.0, false, 0), 2.8);
        // Streak is irrelevant for incorrect answers
        assert_eq!(adjust_difficulty(3.0, false, 5), 2.8);
    }

    #[test]
    fn test_clamped_to_bounds() {
        assert_eq!(adjust_difficulty(1.0, false, 0), 1.0);
        assert_eq!(adjust_difficulty(1.1, false, 0), 1.0);
        assert_eq!(adjust_difficulty(5.0, true, 3), 5.0);
        assert_eq!(adjust_difficulty(4.9, true, 3), 5.0);
    }

    #[test]
    fn test_result_stays_in_domain_and_rounded() {
        let mut d = 1.0;
        while d <= 5.0 {
            for is_correct in [true, false] {
                for streak in [0, 1, 2, 3, 8] {
                    let next = adjust_difficulty(d, is_correct, streak);
                    assert!((MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&next));
                    // One decimal place
                    assert_eq!((next * 10.0).round() / 10.0, next);
                }
            }
            d += 0.1;
        }
    }

    #[test]
    fn test_three_correct_answers_from_two_point_zero() {
        // +0.1, +0.2, +0.3 across a three-answer streak
        let mut difficulty = 2.0;
        let mut streak = 0;
        for _ in 0..3 {
            streak = update_streak(streak, true);
            difficulty = adjust_difficulty(difficulty, true, streak);
        }
        assert_eq!(streak, 3);
        assert_eq!(difficulty, 2.6);
    }
}
