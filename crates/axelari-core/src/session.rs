//! The assessment session: section lifecycle and the completion transition.
//!
//! An [`AssessmentSession`] owns the section catalog, the current learning
//! profile and dimensions, the history log, and at most one running attempt.
//! Every state change goes through one of its action methods:
//!
//! - `start_section`: not-started / in-progress / completed → in-progress
//! - `answer`, `next_question`, `previous_question`: in-progress → in-progress
//! - `submit_section`, `expire_section`: in-progress → completed
//! - `cancel_section`: keeps answered progress in progress; a cancelled
//!   retake returns to completed with its earlier result
//!
//! Completion is idempotent. Once an attempt has completed, any further
//! submit or expiry for it is a no-op.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answers::AnswerRecord;
use crate::catalog::{QuestionBank, SeedData};
use crate::error::AssessmentError;
use crate::history::HistoryLog;
use crate::metadata::{MetadataGenerator, MetadataMode};
use crate::model::{
    HistoricalEntry, LearningDimension, LearningProfile, Question, Section, SectionResult,
    SectionStatus,
};
use crate::notify::{NoopNotifier, Notification, Notifier};
use crate::profile::aggregate;
use crate::scoring::{percent, Scorecard};
use crate::timer::TimerEvent;

type Result<T> = std::result::Result<T, AssessmentError>;

/// What ended an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTrigger {
    Submitted,
    TimeExpired,
}

/// A running attempt at one section.
#[derive(Debug, Clone)]
pub struct ActiveAttempt {
    answers: AnswerRecord,
    cursor: usize,
    duration_secs: u64,
    remaining_secs: u64,
    started_at: DateTime<Utc>,
    /// Progress of the completed section this attempt retakes.
    retake_of: Option<Option<u8>>,
}

impl ActiveAttempt {
    fn new(section_id: u32, duration_secs: u64, retake_of: Option<Option<u8>>) -> Self {
        Self {
            answers: AnswerRecord::new(section_id),
            cursor: 0,
            duration_secs,
            remaining_secs: duration_secs,
            started_at: Utc::now(),
            retake_of,
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.answers.attempt_id()
    }

    pub fn section_id(&self) -> u32 {
        self.answers.section_id()
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    /// Index of the question currently shown.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Seconds left as last reported by the timer.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whether this attempt retakes an already completed section.
    pub fn is_retake(&self) -> bool {
        self.retake_of.is_some()
    }
}

/// Everything the completion transition produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    pub section_id: u32,
    pub attempt_id: Uuid,
    pub trigger: CompletionTrigger,
    pub result: SectionResult,
    pub entry: HistoricalEntry,
}

/// Owned assessment state plus its mutation entry points.
pub struct AssessmentSession {
    bank: QuestionBank,
    sections: Vec<Section>,
    profile: LearningProfile,
    dimensions: Vec<LearningDimension>,
    history: HistoryLog,
    active: Option<ActiveAttempt>,
    metadata: MetadataGenerator,
    notifier: Arc<dyn Notifier>,
}

impl AssessmentSession {
    /// Create a session from a question bank and seed state.
    ///
    /// The profile is recomputed immediately if any seeded section is
    /// already completed.
    pub fn new(
        bank: QuestionBank,
        seed: SeedData,
        mode: MetadataMode,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let mut session = Self {
            bank,
            sections: seed.sections,
            profile: seed.profile,
            dimensions: seed.dimensions,
            history: HistoryLog::from_newest_first(seed.history),
            active: None,
            metadata: MetadataGenerator::new(mode),
            notifier,
        };
        session.recompute_profile();
        session
    }

    /// Session over the built-in bank and seed, with deterministic metadata
    /// and no notifications.
    pub fn builtin() -> Self {
        Self::new(
            QuestionBank::builtin(),
            SeedData::builtin(),
            MetadataMode::Deterministic,
            Arc::new(NoopNotifier),
        )
    }

    /// Rebuild a session from previously saved state without recomputing.
    pub fn restore(
        bank: QuestionBank,
        seed: SeedData,
        mode: MetadataMode,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            bank,
            sections: seed.sections,
            profile: seed.profile,
            dimensions: seed.dimensions,
            history: HistoryLog::from_newest_first(seed.history),
            active: None,
            metadata: MetadataGenerator::new(mode),
            notifier,
        }
    }

    // -- read access ---------------------------------------------------------

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn profile(&self) -> &LearningProfile {
        &self.profile
    }

    pub fn dimensions(&self) -> &[LearningDimension] {
        &self.dimensions
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn active(&self) -> Option<&ActiveAttempt> {
        self.active.as_ref()
    }

    pub fn has_completed_sections(&self) -> bool {
        self.sections.iter().any(Section::is_completed)
    }

    /// Questions of the active attempt's section.
    pub fn active_questions(&self) -> &[Question] {
        match &self.active {
            Some(attempt) => self.bank.questions(attempt.section_id()),
            None => &[],
        }
    }

    /// The question the active attempt is showing.
    pub fn current_question(&self) -> Option<&Question> {
        let attempt = self.active.as_ref()?;
        self.active_questions().get(attempt.cursor)
    }

    /// Whether "next" is enabled: the current question is answered and is
    /// not the last one.
    pub fn can_advance(&self) -> bool {
        let Some(attempt) = &self.active else {
            return false;
        };
        let questions = self.active_questions();
        attempt.cursor + 1 < questions.len()
            && questions
                .get(attempt.cursor)
                .is_some_and(|q| attempt.answers.is_answered(q.id))
    }

    /// Whether "submit" is enabled: on the last question and it is answered.
    pub fn can_submit(&self) -> bool {
        self.check_submit().is_ok()
    }

    /// Flatten the session into seed form for saving.
    pub fn to_seed(&self) -> SeedData {
        SeedData {
            sections: self.sections.clone(),
            profile: self.profile.clone(),
            dimensions: self.dimensions.clone(),
            history: self.history.iter().cloned().collect(),
        }
    }

    // -- actions -------------------------------------------------------------

    /// Begin a fresh attempt at a section. Retaking a completed section moves
    /// its result to `previous_result` until the new attempt completes.
    pub fn start_section(&mut self, section_id: u32) -> Result<&ActiveAttempt> {
        if let Some(attempt) = &self.active {
            return Err(AssessmentError::AttemptActive(attempt.section_id()));
        }

        let section = self
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or(AssessmentError::UnknownSection(section_id))?;

        let retake_of = (section.status == SectionStatus::Completed).then_some(section.progress);
        if retake_of.is_some() {
            section.previous_result = section.result.take();
        }
        section.status = SectionStatus::InProgress;
        section.progress = Some(0);

        let attempt = ActiveAttempt::new(section_id, section.duration_secs(), retake_of);
        tracing::debug!(
            section_id,
            attempt_id = %attempt.attempt_id(),
            duration_secs = attempt.duration_secs,
            "started section"
        );

        Ok(self.active.insert(attempt))
    }

    /// Record the weight chosen for a question of the active section.
    pub fn answer(&mut self, question_id: u32, weight: u8) -> Result<()> {
        let attempt = self.active.as_mut().ok_or(AssessmentError::NoActiveAttempt)?;
        let section_id = attempt.section_id();
        let questions = self.bank.questions(section_id);

        let question = questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(AssessmentError::UnknownQuestion {
                section_id,
                question_id,
            })?;
        if !question.accepts_weight(weight) {
            return Err(AssessmentError::InvalidWeight {
                question_id,
                weight,
            });
        }

        attempt.answers.record(question_id, weight);
        let answered = questions
            .iter()
            .filter(|q| attempt.answers.is_answered(q.id))
            .count();
        let progress = percent(answered as u64, questions.len() as u64);

        if let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) {
            section.progress = Some(progress);
        }
        Ok(())
    }

    /// Answer a question by option index instead of weight.
    pub fn answer_option(&mut self, question_id: u32, index: usize) -> Result<()> {
        let section_id = self
            .active
            .as_ref()
            .ok_or(AssessmentError::NoActiveAttempt)?
            .section_id();
        let weight = self
            .bank
            .question(section_id, question_id)
            .ok_or(AssessmentError::UnknownQuestion {
                section_id,
                question_id,
            })?
            .options
            .get(index)
            .map(|o| o.weight)
            .ok_or(AssessmentError::InvalidOption { question_id, index })?;
        self.answer(question_id, weight)
    }

    /// Move to the next question. Requires the current one to be answered.
    pub fn next_question(&mut self) -> Result<usize> {
        let attempt = self.active.as_mut().ok_or(AssessmentError::NoActiveAttempt)?;
        let questions = self.bank.questions(attempt.section_id());

        if let Some(current) = questions.get(attempt.cursor) {
            if !attempt.answers.is_answered(current.id) {
                return Err(AssessmentError::Unanswered(current.id));
            }
        }
        if attempt.cursor + 1 < questions.len() {
            attempt.cursor += 1;
        }
        Ok(attempt.cursor)
    }

    /// Move to the previous question, stopping at the first.
    pub fn previous_question(&mut self) -> Result<usize> {
        let attempt = self.active.as_mut().ok_or(AssessmentError::NoActiveAttempt)?;
        attempt.cursor = attempt.cursor.saturating_sub(1);
        Ok(attempt.cursor)
    }

    /// Submit the active attempt from its last question.
    ///
    /// Returns `Ok(None)` when there is nothing left to complete, e.g. the
    /// timer already completed the attempt.
    pub fn submit_section(&mut self) -> Result<Option<CompletionOutcome>> {
        if self.active.is_none() {
            tracing::debug!("submit ignored, no active attempt");
            return Ok(None);
        }
        self.check_submit()?;
        Ok(self.complete(CompletionTrigger::Submitted))
    }

    /// Complete the attempt `attempt_id` because its time ran out.
    ///
    /// Stale ids (an attempt already submitted or cancelled) are ignored.
    pub fn expire_section(&mut self, attempt_id: Uuid) -> Option<CompletionOutcome> {
        match &self.active {
            Some(attempt) if attempt.attempt_id() == attempt_id => {
                self.complete(CompletionTrigger::TimeExpired)
            }
            _ => {
                tracing::debug!(%attempt_id, "expiry ignored for inactive attempt");
                None
            }
        }
    }

    /// Abandon the active attempt. A first attempt stays in progress with its
    /// answered share; a retake goes back to completed with its earlier
    /// result and progress.
    pub fn cancel_section(&mut self) -> Option<ActiveAttempt> {
        let attempt = self.active.take()?;
        if let Some(progress) = attempt.retake_of {
            if let Some(section) = self
                .sections
                .iter_mut()
                .find(|s| s.id == attempt.section_id())
            {
                section.status = SectionStatus::Completed;
                section.result = section.previous_result.take();
                section.progress = progress;
            }
        }
        tracing::debug!(
            section_id = attempt.section_id(),
            attempt_id = %attempt.attempt_id(),
            answered = attempt.answers.len(),
            "cancelled section"
        );
        Some(attempt)
    }

    /// Apply a timer event to the active attempt.
    pub fn handle_timer_event(&mut self, event: &TimerEvent) -> Option<CompletionOutcome> {
        let active_id = self.active.as_ref().map(ActiveAttempt::attempt_id);
        if active_id != Some(event.attempt_id()) {
            return None;
        }

        match *event {
            TimerEvent::Tick { remaining, .. } => {
                if let Some(attempt) = self.active.as_mut() {
                    attempt.remaining_secs = remaining;
                }
                None
            }
            TimerEvent::Warning { remaining, .. } => {
                if let Some(attempt) = self.active.as_mut() {
                    attempt.remaining_secs = remaining;
                    let section_id = attempt.section_id();
                    self.notifier.notify(&Notification::TimeWarning {
                        section_id,
                        remaining_secs: remaining,
                    });
                }
                None
            }
            TimerEvent::Expired { attempt_id } => self.expire_section(attempt_id),
        }
    }

    /// Re-run the profile aggregator over the completed sections.
    pub fn recompute_profile(&mut self) {
        if let Some(agg) = aggregate(&self.sections, &mut self.metadata) {
            self.profile = agg.profile;
            self.dimensions = agg.dimensions;
        }
    }

    // -- internals -----------------------------------------------------------

    fn check_submit(&self) -> Result<()> {
        let attempt = self.active.as_ref().ok_or(AssessmentError::NoActiveAttempt)?;
        let questions = self.bank.questions(attempt.section_id());
        if questions.is_empty() {
            return Ok(());
        }
        if attempt.cursor + 1 != questions.len() {
            return Err(AssessmentError::NotOnLastQuestion);
        }
        let last = &questions[attempt.cursor];
        if !attempt.answers.is_answered(last.id) {
            return Err(AssessmentError::Unanswered(last.id));
        }
        Ok(())
    }

    fn complete(&mut self, trigger: CompletionTrigger) -> Option<CompletionOutcome> {
        let section_id = self.active.as_ref()?.section_id();
        if !self.sections.iter().any(|s| s.id == section_id) {
            tracing::warn!(section_id, "dropping attempt for a section that no longer exists");
            self.active = None;
            return None;
        }
        let attempt = self.active.take()?;

        let card = Scorecard::compute(self.bank.questions(section_id), &attempt.answers);
        let reliability = self.metadata.reliability(card.overall);
        let result = SectionResult {
            score: card.overall,
            dimensions: card.dimensions,
            reliability: Some(reliability),
        };

        let section = self.sections.iter_mut().find(|s| s.id == section_id)?;
        section.status = SectionStatus::Completed;
        section.progress = Some(result.score);
        section.result = Some(result.clone());
        section.previous_result = None;
        let section_name = section.name.clone();

        let entry = HistoricalEntry {
            date: Local::now().date_naive(),
            test_name: section_name.clone(),
            dimensions: result.dimensions.clone(),
        };
        self.history.record(entry.clone());

        self.recompute_profile();

        tracing::info!(
            section_id,
            score = result.score,
            trigger = ?trigger,
            "section completed"
        );
        self.notifier.notify(&Notification::SectionCompleted {
            section_id,
            section_name,
            score: result.score,
        });

        Some(CompletionOutcome {
            section_id,
            attempt_id: attempt.attempt_id(),
            trigger,
            result,
            entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;

    fn fresh_session() -> (AssessmentSession, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let session = AssessmentSession::new(
            QuestionBank::builtin(),
            SeedData::fresh(),
            MetadataMode::Deterministic,
            notifier.clone(),
        );
        (session, notifier)
    }

    fn answer_all(session: &mut AssessmentSession, weights: &[u8]) {
        for (i, &w) in weights.iter().enumerate() {
            let qid = session.current_question().unwrap().id;
            session.answer(qid, w).unwrap();
            if i + 1 < weights.len() {
                session.next_question().unwrap();
            }
        }
    }

    fn dim(result: &SectionResult, name: &str) -> u8 {
        result
            .dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.score)
            .unwrap()
    }

    #[test]
    fn builtin_session_recomputes_on_creation() {
        let session = AssessmentSession::builtin();
        assert_eq!(session.profile().profile_type, "Visual-Dominant Learner");
        assert_eq!(session.profile().confidence_score, 75);
        assert_eq!(session.dimensions().len(), 6);
    }

    #[test]
    fn fresh_session_keeps_seed_profile() {
        let (session, _) = fresh_session();
        assert_eq!(session.profile().profile_type, "Visual-Spatial Learner");
        assert!(!session.has_completed_sections());
    }

    #[test]
    fn start_moves_to_in_progress() {
        let (mut session, _) = fresh_session();
        let attempt = session.start_section(3).unwrap();
        assert_eq!(attempt.section_id(), 3);
        assert_eq!(attempt.duration_secs(), 1200);
        let section = session.section(3).unwrap();
        assert_eq!(section.status, SectionStatus::InProgress);
        assert_eq!(section.progress, Some(0));
        assert!(section.is_consistent());
    }

    #[test]
    fn start_errors() {
        let (mut session, _) = fresh_session();
        assert_eq!(
            session.start_section(42).unwrap_err(),
            AssessmentError::UnknownSection(42)
        );
        session.start_section(1).unwrap();
        assert_eq!(
            session.start_section(2).unwrap_err(),
            AssessmentError::AttemptActive(1)
        );
    }

    #[test]
    fn answer_validates_question_and_weight() {
        let (mut session, _) = fresh_session();
        assert_eq!(
            session.answer(1, 100).unwrap_err(),
            AssessmentError::NoActiveAttempt
        );
        session.start_section(1).unwrap();
        assert_eq!(
            session.answer(9, 100).unwrap_err(),
            AssessmentError::UnknownQuestion {
                section_id: 1,
                question_id: 9
            }
        );
        assert_eq!(
            session.answer(1, 60).unwrap_err(),
            AssessmentError::InvalidWeight {
                question_id: 1,
                weight: 60
            }
        );
        session.answer(1, 25).unwrap();
        session.answer(1, 100).unwrap();
        assert_eq!(session.active().unwrap().answers().get(1), Some(100));
        assert_eq!(session.section(1).unwrap().progress, Some(20));
    }

    #[test]
    fn answer_option_maps_index_to_weight() {
        let (mut session, _) = fresh_session();
        session.start_section(1).unwrap();
        session.answer_option(2, 2).unwrap();
        assert_eq!(session.active().unwrap().answers().get(2), Some(75));
        assert_eq!(
            session.answer_option(2, 4).unwrap_err(),
            AssessmentError::InvalidOption {
                question_id: 2,
                index: 4
            }
        );
    }

    #[test]
    fn navigation_requires_answer() {
        let (mut session, _) = fresh_session();
        session.start_section(1).unwrap();
        assert!(!session.can_advance());
        assert_eq!(
            session.next_question().unwrap_err(),
            AssessmentError::Unanswered(1)
        );
        session.answer(1, 100).unwrap();
        assert!(session.can_advance());
        assert_eq!(session.next_question().unwrap(), 1);
        assert_eq!(session.previous_question().unwrap(), 0);
        assert_eq!(session.previous_question().unwrap(), 0);
    }

    #[test]
    fn submit_only_from_answered_last_question() {
        let (mut session, _) = fresh_session();
        session.start_section(2).unwrap();
        session.answer(1, 100).unwrap();
        assert_eq!(
            session.submit_section().unwrap_err(),
            AssessmentError::NotOnLastQuestion
        );
        session.next_question().unwrap();
        assert!(!session.can_submit());
        assert_eq!(
            session.submit_section().unwrap_err(),
            AssessmentError::Unanswered(2)
        );
        session.answer(2, 50).unwrap();
        assert!(session.can_submit());
        assert!(session.submit_section().unwrap().is_some());
    }

    #[test]
    fn full_section_one_end_to_end() {
        let (mut session, notifier) = fresh_session();
        session.start_section(1).unwrap();
        answer_all(&mut session, &[100, 25, 50, 100, 75]);

        let outcome = session.submit_section().unwrap().unwrap();
        assert_eq!(outcome.trigger, CompletionTrigger::Submitted);
        assert_eq!(outcome.result.score, 100);
        assert_eq!(dim(&outcome.result, "Visual"), 88);
        assert_eq!(dim(&outcome.result, "Auditory"), 25);
        assert_eq!(dim(&outcome.result, "Reading/Writing"), 50);
        assert_eq!(dim(&outcome.result, "Kinesthetic"), 100);

        let section = session.section(1).unwrap();
        assert_eq!(section.status, SectionStatus::Completed);
        assert_eq!(section.score(), Some(100));
        let reliability = section.result.as_ref().unwrap().reliability.clone().unwrap();
        assert!(reliability.confidence_interval[0] <= 100);
        assert!(reliability.confidence_interval[1] >= reliability.confidence_interval[0]);

        assert_eq!(session.history().len(), 1);
        assert_eq!(
            session.history().latest().unwrap().dimensions,
            outcome.result.dimensions
        );
        // Kinesthetic (100) beats Visual (88).
        assert_eq!(session.profile().profile_type, "Kinesthetic-Dominant Learner");
        assert_eq!(session.profile().confidence_score, 75);
        assert!(session.active().is_none());

        let completed: Vec<_> = notifier
            .received()
            .into_iter()
            .filter(|n| matches!(n, Notification::SectionCompleted { .. }))
            .collect();
        assert_eq!(completed.len(), 1);
    }

    #[test]
    fn completion_is_idempotent() {
        let (mut session, _) = fresh_session();
        let attempt_id = session.start_section(2).unwrap().attempt_id();
        answer_all(&mut session, &[100, 100]);

        assert!(session.submit_section().unwrap().is_some());
        assert!(session.submit_section().unwrap().is_none());
        assert!(session.expire_section(attempt_id).is_none());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.section(2).unwrap().score(), Some(100));
    }

    #[test]
    fn expiry_with_nothing_answered_scores_zero() {
        let (mut session, notifier) = fresh_session();
        let attempt_id = session.start_section(1).unwrap().attempt_id();

        let outcome = session
            .handle_timer_event(&TimerEvent::Expired { attempt_id })
            .unwrap();
        assert_eq!(outcome.trigger, CompletionTrigger::TimeExpired);
        assert_eq!(outcome.result.score, 0);
        assert_eq!(outcome.result.dimensions.len(), 4);
        assert!(outcome.result.dimensions.iter().all(|d| d.score == 0));

        assert_eq!(session.history().len(), 1);
        assert!(session
            .history()
            .latest()
            .unwrap()
            .dimensions
            .iter()
            .all(|d| d.score == 0));

        assert!(session
            .handle_timer_event(&TimerEvent::Expired { attempt_id })
            .is_none());
        assert_eq!(session.history().len(), 1);
        assert_eq!(notifier.received().len(), 1);
    }

    #[test]
    fn stale_timer_events_are_ignored() {
        let (mut session, notifier) = fresh_session();
        let first = session.start_section(1).unwrap().attempt_id();
        session.cancel_section();
        session.start_section(1).unwrap();

        assert!(session
            .handle_timer_event(&TimerEvent::Warning {
                attempt_id: first,
                remaining: 180
            })
            .is_none());
        assert!(session.expire_section(first).is_none());
        assert!(session.active().is_some());
        assert!(notifier.received().is_empty());
    }

    #[test]
    fn warning_event_notifies_and_tracks_remaining() {
        let (mut session, notifier) = fresh_session();
        let attempt_id = session.start_section(1).unwrap().attempt_id();
        session.handle_timer_event(&TimerEvent::Tick {
            attempt_id,
            remaining: 500,
        });
        assert_eq!(session.active().unwrap().remaining_secs(), 500);
        session.handle_timer_event(&TimerEvent::Warning {
            attempt_id,
            remaining: 180,
        });
        assert_eq!(
            notifier.received(),
            vec![Notification::TimeWarning {
                section_id: 1,
                remaining_secs: 180
            }]
        );
    }

    #[test]
    fn cancel_keeps_status() {
        let (mut session, _) = fresh_session();
        session.start_section(4).unwrap();
        session.answer(1, 100).unwrap();
        let cancelled = session.cancel_section().unwrap();
        assert_eq!(cancelled.answers().len(), 1);
        let section = session.section(4).unwrap();
        assert_eq!(section.status, SectionStatus::InProgress);
        assert_eq!(section.progress, Some(50));
        assert!(session.cancel_section().is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn retake_resets_attempt_and_keeps_prior_result_readable() {
        let (mut session, _) = fresh_session();
        session.start_section(2).unwrap();
        answer_all(&mut session, &[100, 100]);
        session.submit_section().unwrap();

        session.start_section(2).unwrap();
        let attempt = session.active().unwrap();
        assert!(attempt.answers().is_empty());
        assert_eq!(attempt.cursor(), 0);

        let section = session.section(2).unwrap();
        assert_eq!(section.status, SectionStatus::InProgress);
        assert_eq!(section.progress, Some(0));
        assert!(section.result.is_none());
        assert_eq!(section.previous_result.as_ref().unwrap().score, 100);
        assert!(section.is_consistent());

        answer_all(&mut session, &[25, 25]);
        session.submit_section().unwrap();
        let section = session.section(2).unwrap();
        assert_eq!(section.score(), Some(100));
        assert_eq!(dim(section.result.as_ref().unwrap(), "Working Memory"), 25);
        assert!(section.previous_result.is_none());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn cancelled_retake_restores_completed_section() {
        let (mut session, _) = fresh_session();
        session.start_section(2).unwrap();
        answer_all(&mut session, &[100, 50]);
        session.submit_section().unwrap();
        session.start_section(3).unwrap();
        answer_all(&mut session, &[100, 75]);
        session.submit_section().unwrap();

        let before = session.section(2).unwrap().clone();
        let profile = session.profile().clone();

        session.start_section(2).unwrap();
        assert!(session.active().unwrap().is_retake());
        session.answer(1, 25).unwrap();
        session.cancel_section().unwrap();

        let section = session.section(2).unwrap();
        assert_eq!(section.status, SectionStatus::Completed);
        assert_eq!(section.score(), before.score());
        assert_eq!(section.dimensions(), before.dimensions());
        assert_eq!(section.progress, before.progress);
        assert!(section.previous_result.is_none());
        assert!(section.is_consistent());
        assert_eq!(session.profile(), &profile);

        session.start_section(4).unwrap();
        answer_all(&mut session, &[100, 100]);
        session.submit_section().unwrap();
        let names: Vec<&str> = session.dimensions().iter().map(|d| d.name.as_str()).collect();
        assert!(names.contains(&"Working Memory"));
        assert!(names.contains(&"Sustained Attention"));
        assert!(names.contains(&"Short-term Memory"));
    }

    #[test]
    fn aggregation_across_sections() {
        let (mut session, _) = fresh_session();
        session.start_section(1).unwrap();
        answer_all(&mut session, &[100, 25, 50, 25, 75]);
        session.submit_section().unwrap();
        session.start_section(3).unwrap();
        answer_all(&mut session, &[100, 100]);
        session.submit_section().unwrap();

        assert_eq!(session.profile().confidence_score, 80);
        let names: Vec<&str> = session
            .dimensions()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names.len(), 6);
        assert_eq!(
            session.profile().profile_type,
            "Distraction Sensitivity-Dominant Learner"
        );
    }

    #[test]
    fn empty_section_submits_with_zero_score() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut seed = SeedData::fresh();
        seed.sections[0].id = 77;
        let mut session = AssessmentSession::new(
            QuestionBank::builtin(),
            seed,
            MetadataMode::Deterministic,
            notifier,
        );
        session.start_section(77).unwrap();
        assert!(session.current_question().is_none());
        let outcome = session.submit_section().unwrap().unwrap();
        assert_eq!(outcome.result.score, 0);
        assert!(outcome.result.dimensions.is_empty());
    }
}
