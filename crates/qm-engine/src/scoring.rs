//! Scoring policies and performance aggregation.
//!
//! Two deliberately distinct point policies coexist and must not be
//! unified: the multiple-choice quiz flow awards a flat amount per correct
//! answer, while the free-text chat flow weights points by difficulty and
//! answer speed. Collapsing them into one formula would silently change
//! scores.

use serde::Serialize;

/// Points awarded for a correct answer under the fixed-award policy.
pub const FIXED_AWARD_POINTS: i32 = 10;

/// Fixed-award policy used by the multiple-choice quiz flow.
///
/// Correct answers earn [`FIXED_AWARD_POINTS`], incorrect answers earn
/// nothing. Difficulty and time are irrelevant here.
pub fn fixed_award(is_correct: bool) -> i32 {
    if is_correct { FIXED_AWARD_POINTS } else { 0 }
}

/// Weighted policy used for free-text answers.
///
/// Incorrect answers earn 0. Correct answers earn
/// `floor(100 * difficulty)` plus a time bonus: 50 points under 30
/// seconds, 25 under 60 seconds, nothing after that.
pub fn weighted_score(difficulty: f64, time_taken_secs: i64, is_correct: bool) -> i64 {
    if !is_correct {
        return 0;
    }

    let time_bonus = if time_taken_secs < 30 {
        50
    } else if time_taken_secs < 60 {
        25
    } else {
        0
    };

    (100.0 * difficulty) as i64 + time_bonus
}

/// One persisted answer, reduced to the signal the analyzer consumes.
#[derive(Debug, Clone)]
pub struct AnswerSignal {
    /// Whether the answer was correct
    pub is_correct: bool,
    /// Difficulty in effect when the question was answered
    pub difficulty: f64,
    /// Topic key of the question
    pub topic: String,
}

/// Aggregate performance over a set of answer records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    /// Number of records analyzed
    pub total_questions: usize,
    /// Percentage of correct answers, rounded to 2 decimals
    pub accuracy: f64,
    /// Mean difficulty across records, rounded to 2 decimals
    pub average_difficulty: f64,
    /// Up to 3 best-performing topic keys, best first
    pub strongest_topics: Vec<String>,
    /// Up to 3 worst-performing topic keys, in ranking order
    pub weakest_topics: Vec<String>,
}

impl PerformanceReport {
    /// The documented "no data" report for an empty record set.
    pub const fn empty() -> Self {
        Self {
            total_questions: 0,
            accuracy: 0.0,
            average_difficulty: 0.0,
            strongest_topics: Vec::new(),
            weakest_topics: Vec::new(),
        }
    }
}

/// Analyze a batch of answer records into topic-level strengths.
///
/// Topics are ranked by per-topic accuracy, descending. The sort is
/// stable, so topics with equal accuracy keep the order in which they
/// first appeared in `records`. `strongest_topics` takes the first 3
/// ranked keys and `weakest_topics` the last 3; with fewer than 6 distinct
/// topics the two lists overlap. That overlap matches the shipped
/// behavior and is kept as-is.
pub fn analyze_performance(records: &[AnswerSignal]) -> PerformanceReport {
    if records.is_empty() {
        return PerformanceReport::empty();
    }

    let total = records.len();
    let correct = records.iter().filter(|r| r.is_correct).count();
    let accuracy = (correct as f64 / total as f64) * 100.0;
    let average_difficulty = records.iter().map(|r| r.difficulty).sum::<f64>() / total as f64;

    // Per-topic tallies in first-encountered order. Topic counts are tiny
    // (a fixed catalog), so a Vec with linear lookup keeps the insertion
    // order the tie-break depends on.
    let mut topic_stats: Vec<(String, TopicTally)> = Vec::new();
    for record in records {
        match topic_stats.iter_mut().find(|(t, _)| *t == record.topic) {
            Some((_, tally)) => tally.record(record.is_correct),
            None => {
                let mut tally = TopicTally::default();
                tally.record(record.is_correct);
                topic_stats.push((record.topic.clone(), tally));
            }
        }
    }

    // Stable sort: equal accuracies keep insertion order.
    topic_stats.sort_by(|a, b| b.1.accuracy().total_cmp(&a.1.accuracy()));

    let strongest_topics = topic_stats
        .iter()
        .take(3)
        .map(|(topic, _)| topic.clone())
        .collect();
    let weakest_topics = topic_stats[topic_stats.len().saturating_sub(3)..]
        .iter()
        .map(|(topic, _)| topic.clone())
        .collect();

    PerformanceReport {
        total_questions: total,
        accuracy: round2(accuracy),
        average_difficulty: round2(average_difficulty),
        strongest_topics,
        weakest_topics,
    }
}

#[derive(Debug, Default)]
struct TopicTally {
    correct: u32,
    total: u32,
}

impl TopicTally {
    fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total)
        }
    }
}

/// Accuracy percentage over raw counts, rounded to 2 decimals.
pub fn calculate_accuracy(correct: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2((correct as f64 / total as f64) * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
