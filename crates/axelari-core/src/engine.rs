//! Timed assessment engine.
//!
//! Pairs an [`AssessmentSession`] with the [`SectionTimer`] of its active
//! attempt. Starting a section spawns a timer, and any completion or
//! cancellation stops it. Timer events arrive on a channel owned by the
//! engine and are fed back through [`AssessmentEngine::handle_timer_event`],
//! so every state change still happens on the caller's task.

use std::time::Duration;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::session::{ActiveAttempt, AssessmentSession, CompletionOutcome};
use crate::timer::{SectionTimer, TimerEvent};

type Result<T> = std::result::Result<T, AssessmentError>;

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock length of one timer second.
    pub tick_period: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
        }
    }
}

/// Session plus the timer of its running attempt.
pub struct AssessmentEngine {
    session: AssessmentSession,
    timer: Option<SectionTimer>,
    events_tx: mpsc::UnboundedSender<TimerEvent>,
    events_rx: mpsc::UnboundedReceiver<TimerEvent>,
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(session: AssessmentSession, config: EngineConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            session,
            timer: None,
            events_tx,
            events_rx,
            config,
        }
    }

    pub fn session(&self) -> &AssessmentSession {
        &self.session
    }

    pub fn into_session(self) -> AssessmentSession {
        self.session
    }

    /// Whether a timer task is still counting down.
    pub fn timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start a section and its countdown. Must be called inside a tokio
    /// runtime.
    pub fn start_section(&mut self, section_id: u32) -> Result<&ActiveAttempt> {
        let attempt = self.session.start_section(section_id)?;
        let timer = SectionTimer::spawn_with_period(
            attempt.attempt_id(),
            attempt.duration_secs(),
            self.config.tick_period,
            self.events_tx.clone(),
        );
        self.timer = Some(timer);
        self.session
            .active()
            .ok_or(AssessmentError::NoActiveAttempt)
    }

    pub fn answer(&mut self, question_id: u32, weight: u8) -> Result<()> {
        self.session.answer(question_id, weight)
    }

    pub fn answer_option(&mut self, question_id: u32, index: usize) -> Result<()> {
        self.session.answer_option(question_id, index)
    }

    pub fn next_question(&mut self) -> Result<usize> {
        self.session.next_question()
    }

    pub fn previous_question(&mut self) -> Result<usize> {
        self.session.previous_question()
    }

    /// Submit the active attempt and stop its timer.
    pub fn submit_section(&mut self) -> Result<Option<CompletionOutcome>> {
        let outcome = self.session.submit_section()?;
        if outcome.is_some() {
            self.stop_timer();
        }
        Ok(outcome)
    }

    /// Abandon the active attempt and stop its timer.
    pub fn cancel_section(&mut self) -> Option<ActiveAttempt> {
        self.stop_timer();
        self.session.cancel_section()
    }

    /// Wait for the next event from the running timer.
    ///
    /// Pends forever when no timer is running, which makes it safe to use as
    /// one branch of a `tokio::select!`.
    pub async fn next_timer_event(&mut self) -> Option<TimerEvent> {
        self.events_rx.recv().await
    }

    /// Apply a timer event. Events from an earlier attempt are dropped.
    pub fn handle_timer_event(&mut self, event: TimerEvent) -> Option<CompletionOutcome> {
        let outcome = self.session.handle_timer_event(&event);
        if outcome.is_some() {
            self.timer = None;
        }
        outcome
    }

    /// Drive the timer until the active attempt completes by expiry.
    ///
    /// Returns `None` if no attempt is active.
    pub async fn run_to_expiry(&mut self) -> Option<CompletionOutcome> {
        let attempt_id: Uuid = self.session.active()?.attempt_id();
        while let Some(event) = self.next_timer_event().await {
            if let Some(outcome) = self.handle_timer_event(event) {
                return Some(outcome);
            }
            if self.session.active().map(ActiveAttempt::attempt_id) != Some(attempt_id) {
                return None;
            }
        }
        None
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            tracing::debug!(attempt_id = %timer.attempt_id(), "stopping section timer");
            timer.cancel();
        }
    }
}
