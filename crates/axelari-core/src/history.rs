//! Append-only log of completed tests, newest first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::model::HistoricalEntry;

/// Reverse-chronological list of completed-test snapshots.
///
/// Entries can only be prepended; nothing is ever edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: VecDeque<HistoricalEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from entries already ordered newest first.
    pub fn from_newest_first(entries: Vec<HistoricalEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Prepend a new entry.
    pub fn record(&mut self, entry: HistoricalEntry) {
        self.entries.push_front(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoricalEntry> {
        self.entries.front()
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoricalEntry> {
        self.entries.iter()
    }

    /// Entries for one test, newest first.
    pub fn for_test<'a>(&'a self, test_name: &'a str) -> impl Iterator<Item = &'a HistoricalEntry> {
        self.entries.iter().filter(move |e| e.test_name == test_name)
    }
}
