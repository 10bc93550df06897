//! Section countdown timer.
//!
//! [`Countdown`] is the synchronous state machine: one `tick()` per elapsed
//! second. [`SectionTimer`] drives it from a tokio interval and forwards the
//! resulting [`TimerEvent`]s over a channel until it expires or is cancelled.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

/// Fraction of the duration left when the warning fires.
const WARNING_FRACTION: f64 = 0.2;

/// What one tick of a [`Countdown`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Seconds left after this tick.
    pub remaining: u64,
    /// The warning threshold was reached on this tick.
    pub warning: bool,
    /// The countdown reached zero on this tick.
    pub expired: bool,
}

/// Per-second countdown with a one-shot warning and a terminal expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration: u64,
    remaining: u64,
    warning_at: u64,
    warned: bool,
    expired: bool,
}

impl Countdown {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration: duration_secs,
            remaining: duration_secs,
            warning_at: (duration_secs as f64 * WARNING_FRACTION).floor() as u64,
            warned: false,
            expired: false,
        }
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Remaining seconds at which the warning fires.
    pub fn warning_threshold(&self) -> u64 {
        self.warning_at
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Advance by one second. Returns `None` once expired.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.expired {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);

        let warning = !self.warned && self.warning_at > 0 && self.remaining == self.warning_at;
        if warning {
            self.warned = true;
        }

        let expired = self.remaining == 0;
        if expired {
            self.expired = true;
        }

        Some(Tick {
            remaining: self.remaining,
            warning,
            expired,
        })
    }
}

/// Format seconds as zero-padded `MM:SS`.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Event emitted by a running [`SectionTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed.
    Tick { attempt_id: Uuid, remaining: u64 },
    /// The warning threshold was reached.
    Warning { attempt_id: Uuid, remaining: u64 },
    /// Time is up; no further events follow.
    Expired { attempt_id: Uuid },
}

impl TimerEvent {
    pub fn attempt_id(&self) -> Uuid {
        match self {
            TimerEvent::Tick { attempt_id, .. }
            | TimerEvent::Warning { attempt_id, .. }
            | TimerEvent::Expired { attempt_id } => *attempt_id,
        }
    }
}

/// A countdown running on the tokio runtime.
///
/// The background task stops on expiry, on [`cancel`](Self::cancel), when
/// the receiver is dropped, or when the timer itself is dropped.
#[derive(Debug)]
pub struct SectionTimer {
    attempt_id: Uuid,
    handle: JoinHandle<()>,
}

impl SectionTimer {
    /// Spawn a timer for `attempt_id` that reports on `events`.
    pub fn spawn(
        attempt_id: Uuid,
        duration_secs: u64,
        events: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self::spawn_with_period(attempt_id, duration_secs, Duration::from_secs(1), events)
    }

    /// Like [`spawn`](Self::spawn) with a custom tick period.
    pub fn spawn_with_period(
        attempt_id: Uuid,
        duration_secs: u64,
        period: Duration,
        events: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut countdown = Countdown::new(duration_secs);
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(tick) = countdown.tick() else {
                    break;
                };

                let mut batch = vec![TimerEvent::Tick {
                    attempt_id,
                    remaining: tick.remaining,
                }];
                if tick.warning {
                    batch.push(TimerEvent::Warning {
                        attempt_id,
                        remaining: tick.remaining,
                    });
                }
                if tick.expired {
                    batch.push(TimerEvent::Expired { attempt_id });
                }

                for event in batch {
                    if events.send(event).is_err() {
                        tracing::debug!(%attempt_id, "timer receiver dropped, stopping");
                        return;
                    }
                }

                if tick.expired {
                    break;
                }
            }
        });

        Self { attempt_id, handle }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    /// Stop ticking. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SectionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
