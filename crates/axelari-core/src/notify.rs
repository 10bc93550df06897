//! Fire-and-forget notifications ("toasts") raised by the engine.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::timer::format_mmss;

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// The active section reached its time warning.
    TimeWarning { section_id: u32, remaining_secs: u64 },
    /// A section attempt was completed and scored.
    SectionCompleted {
        section_id: u32,
        section_name: String,
        score: u8,
    },
    /// Something failed but the session carries on.
    Error { message: String },
}

impl Notification {
    pub fn title(&self) -> &str {
        match self {
            Notification::TimeWarning { .. } => "Time is running out!",
            Notification::SectionCompleted { .. } => "Assessment Completed!",
            Notification::Error { .. } => "Error",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notification::TimeWarning { remaining_secs, .. } => format!(
                "You have 20% of your time remaining ({}).",
                format_mmss(*remaining_secs)
            ),
            Notification::SectionCompleted {
                section_name,
                score,
                ..
            } => format!("{section_name} scored {score}%. Your results are now available."),
            Notification::Error { message } => message.clone(),
        }
    }

    /// Returns `true` for notifications shown with destructive styling.
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Notification::TimeWarning { .. } | Notification::Error { .. }
        )
    }
}

/// Receiver of notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Discards every notification.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _: &Notification) {}
}

/// Keeps every notification in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        if let Ok(mut guard) = self.received.lock() {
            guard.push(notification.clone());
        }
    }
}
