//! Assessment error types.
//!
//! Returned by the session state machine when an action does not apply to the
//! current state. None of these are fatal: callers recover by ignoring the
//! action or showing a notification.

use thiserror::Error;

/// Errors raised by assessment actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    /// No section with this id exists.
    #[error("unknown section: {0}")]
    UnknownSection(u32),

    /// The section exists but the question bank has no such question.
    #[error("section {section_id} has no question {question_id}")]
    UnknownQuestion { section_id: u32, question_id: u32 },

    /// The weight does not match any option of the question.
    #[error("weight {weight} is not an option of question {question_id}")]
    InvalidWeight { question_id: u32, weight: u8 },

    /// The option index is out of range for the question.
    #[error("question {question_id} has no option {index}")]
    InvalidOption { question_id: u32, index: usize },

    /// An action needs a running attempt but none is active.
    #[error("no section is in progress")]
    NoActiveAttempt,

    /// Another section's attempt is still running.
    #[error("section {0} is already in progress")]
    AttemptActive(u32),

    /// The current question must be answered before moving on or submitting.
    #[error("question {0} has not been answered")]
    Unanswered(u32),

    /// Manual submission is only offered on the last question.
    #[error("submission is only available on the last question")]
    NotOnLastQuestion,
}

impl AssessmentError {
    /// Returns `true` if the error reflects a disabled UI affordance rather
    /// than a bad reference.
    pub fn is_affordance(&self) -> bool {
        matches!(
            self,
            AssessmentError::Unanswered(_) | AssessmentError::NotOnLastQuestion
        )
    }
}
