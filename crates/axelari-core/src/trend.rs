//! Compare dimension scores between two attempts at the same test.

use serde::{Deserialize, Serialize};

use crate::history::HistoryLog;
use crate::model::HistoricalEntry;

/// Default number of points a dimension must move to count as a change.
pub const DEFAULT_THRESHOLD: u8 = 2;

/// Per-dimension changes between a baseline attempt and a later one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub test_name: String,
    pub baseline: HistoricalEntry,
    pub current: HistoricalEntry,
    /// Dimensions whose score rose by more than the threshold.
    pub improvements: Vec<DimensionChange>,
    /// Dimensions whose score fell by more than the threshold.
    pub declines: Vec<DimensionChange>,
    pub unchanged: usize,
    /// Dimensions only present in the current attempt.
    pub new_dimensions: usize,
    /// Dimensions only present in the baseline.
    pub dropped_dimensions: usize,
}

/// One dimension's movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionChange {
    pub dimension: String,
    pub baseline: u8,
    pub current: u8,
    pub delta: i16,
}

impl TrendReport {
    /// Compare two entries. Changes of at most `threshold` points are counted
    /// as unchanged.
    pub fn compare(baseline: &HistoricalEntry, current: &HistoricalEntry, threshold: u8) -> Self {
        let mut improvements = Vec::new();
        let mut declines = Vec::new();
        let mut unchanged = 0usize;
        let mut new_dimensions = 0usize;

        for dim in &current.dimensions {
            let Some(before) = baseline.dimensions.iter().find(|d| d.name == dim.name) else {
                new_dimensions += 1;
                continue;
            };

            let delta = dim.score as i16 - before.score as i16;
            let change = DimensionChange {
                dimension: dim.name.clone(),
                baseline: before.score,
                current: dim.score,
                delta,
            };
            if delta > threshold as i16 {
                improvements.push(change);
            } else if delta < -(threshold as i16) {
                declines.push(change);
            } else {
                unchanged += 1;
            }
        }

        let dropped_dimensions = baseline
            .dimensions
            .iter()
            .filter(|d| !current.dimensions.iter().any(|c| c.name == d.name))
            .count();

        Self {
            test_name: current.test_name.clone(),
            baseline: baseline.clone(),
            current: current.clone(),
            improvements,
            declines,
            unchanged,
            new_dimensions,
            dropped_dimensions,
        }
    }

    /// Compare the two most recent entries for `test_name`.
    ///
    /// Returns `None` when the test has fewer than two entries.
    pub fn latest(history: &HistoryLog, test_name: &str, threshold: u8) -> Option<Self> {
        let mut entries = history.for_test(test_name);
        let current = entries.next()?;
        let baseline = entries.next()?;
        Some(Self::compare(baseline, current, threshold))
    }

    pub fn has_declines(&self) -> bool {
        !self.declines.is_empty()
    }

    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "## {}: {} vs {}\n\n",
            self.test_name, self.current.date, self.baseline.date
        ));
        md.push_str(&format!(
            "**Summary:** {} improvements, {} declines, {} unchanged\n\n",
            self.improvements.len(),
            self.declines.len(),
            self.unchanged
        ));

        let sections = [
            ("Improvements", &self.improvements),
            ("Declines", &self.declines),
        ];
        for (title, changes) in sections {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Dimension | Before | After | Delta |\n");
            md.push_str("|-----------|--------|-------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {}% | {}% | {:+} |\n",
                    c.dimension, c.baseline, c.current, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }
}
