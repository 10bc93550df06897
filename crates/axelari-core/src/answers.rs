//! Per-attempt answer store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Selected option weight per question id, scoped to one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    attempt_id: Uuid,
    section_id: u32,
    answers: HashMap<u32, u8>,
}

impl AnswerRecord {
    /// Start an empty record for a new attempt at `section_id`.
    pub fn new(section_id: u32) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            section_id,
            answers: HashMap::new(),
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn section_id(&self) -> u32 {
        self.section_id
    }

    /// Record (or replace) the weight chosen for a question.
    pub fn record(&mut self, question_id: u32, weight: u8) -> Option<u8> {
        self.answers.insert(question_id, weight)
    }

    pub fn get(&self, question_id: u32) -> Option<u8> {
        self.answers.get(&question_id).copied()
    }

    pub fn is_answered(&self, question_id: u32) -> bool {
        self.answers.contains_key(&question_id)
    }

    /// Number of distinct questions answered.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
