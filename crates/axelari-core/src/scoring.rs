//! Completion and per-dimension scoring.
//!
//! The overall figure measures completion, not performance:
//!
//! score = round(100 · answered / total)
//!
//! Each dimension divides the recorded weights by the maximum possible weight
//! over *all* of that dimension's questions, so unanswered questions pull the
//! dimension down:
//!
//! dimension = round(100 · Σ weights / (100 · questions in dimension))
//!
//! Rounding is half-up and done in integer arithmetic.

use crate::answers::AnswerRecord;
use crate::model::{DimensionScore, Question, MAX_WEIGHT};

/// Scores produced for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    /// Completion percentage.
    pub overall: u8,
    /// One entry per distinct dimension, in first-appearance order.
    pub dimensions: Vec<DimensionScore>,
}

impl Scorecard {
    /// Score an answer record against a section's questions.
    pub fn compute(questions: &[Question], answers: &AnswerRecord) -> Self {
        Self {
            overall: completion_score(questions, answers),
            dimensions: dimension_scores(questions, answers),
        }
    }
}

/// `round(100 · num / den)` with half-up rounding; `0` when `den` is zero.
pub fn percent(num: u64, den: u64) -> u8 {
    if den == 0 {
        return 0;
    }
    let rounded = (200 * num + den) / (2 * den);
    rounded.min(100) as u8
}

/// Half-up rounded mean of `values`; `0` when empty.
pub fn rounded_mean(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let sum: u64 = values.iter().map(|&v| v as u64).sum();
    let n = values.len() as u64;
    ((2 * sum + n) / (2 * n)).min(100) as u8
}

/// Percentage of questions that have a recorded answer.
pub fn completion_score(questions: &[Question], answers: &AnswerRecord) -> u8 {
    let answered = questions
        .iter()
        .filter(|q| answers.is_answered(q.id))
        .count() as u64;
    percent(answered, questions.len() as u64)
}

/// Score every distinct dimension present among `questions`.
pub fn dimension_scores(questions: &[Question], answers: &AnswerRecord) -> Vec<DimensionScore> {
    let mut order: Vec<&str> = Vec::new();
    for q in questions {
        if !order.contains(&q.dimension.as_str()) {
            order.push(&q.dimension);
        }
    }

    order
        .into_iter()
        .map(|dimension| {
            let tagged: Vec<&Question> = questions
                .iter()
                .filter(|q| q.dimension == dimension)
                .collect();
            let recorded: Vec<u64> = tagged
                .iter()
                .filter_map(|q| answers.get(q.id))
                .map(|w| w as u64)
                .collect();

            if recorded.is_empty() {
                return DimensionScore::new(dimension, 0);
            }

            let total: u64 = recorded.iter().sum();
            let possible = tagged.len() as u64 * MAX_WEIGHT as u64;
            DimensionScore::new(dimension, percent(total, possible) as u32)
        })
        .collect()
}
