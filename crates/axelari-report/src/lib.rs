//! axelari-report: Result reports.
//!
//! Collects the learning profile, dimensions, section results and history of
//! a session into a [`ResultsReport`] and renders it as self-contained HTML
//! or markdown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use axelari_core::model::{
    DimensionScore, HistoricalEntry, LearningDimension, LearningProfile, Reliability, Section,
    SectionStatus,
};
use axelari_core::session::AssessmentSession;

pub mod html;
pub mod markdown;

/// Everything a results screen shows, detached from the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsReport {
    pub generated_at: DateTime<Utc>,
    pub profile: LearningProfile,
    pub dimensions: Vec<LearningDimension>,
    pub sections: Vec<SectionSummary>,
    /// Newest first.
    pub history: Vec<HistoricalEntry>,
}

/// One row of the section overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub id: u32,
    pub name: String,
    pub status: SectionStatus,
    pub progress: Option<u8>,
    pub score: Option<u8>,
    /// Score of the completed attempt a running retake would replace.
    #[serde(default)]
    pub previous_score: Option<u8>,
    pub reliability: Option<Reliability>,
    pub dimensions: Vec<DimensionScore>,
}

impl From<&Section> for SectionSummary {
    fn from(section: &Section) -> Self {
        let result = section.result.as_ref();
        Self {
            id: section.id,
            name: section.name.clone(),
            status: section.status,
            progress: section.progress,
            score: result.map(|r| r.score),
            previous_score: section.previous_result.as_ref().map(|r| r.score),
            reliability: result.and_then(|r| r.reliability.clone()),
            dimensions: result.map(|r| r.dimensions.clone()).unwrap_or_default(),
        }
    }
}

impl SectionSummary {
    /// Score cell text: the result, or the answered share of a running
    /// attempt with the score it would replace.
    pub fn score_label(&self) -> String {
        match (self.score, self.progress, self.previous_score) {
            (Some(score), _, _) => format!("{score}%"),
            (None, Some(progress), Some(prev)) => {
                format!("{progress}% answered (previous {prev}%)")
            }
            (None, Some(progress), None) => format!("{progress}% answered"),
            (None, None, _) => "-".to_string(),
        }
    }
}

impl ResultsReport {
    pub fn from_session(session: &AssessmentSession) -> Self {
        Self {
            generated_at: Utc::now(),
            profile: session.profile().clone(),
            dimensions: session.dimensions().to_vec(),
            sections: session.sections().iter().map(SectionSummary::from).collect(),
            history: session.history().iter().cloned().collect(),
        }
    }

    pub fn completed_sections(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.status == SectionStatus::Completed)
            .count()
    }
}

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
pub(crate) fn sample_report() -> ResultsReport {
    ResultsReport::from_session(&AssessmentSession::builtin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_from_builtin_session() {
        let report = sample_report();
        assert_eq!(report.sections.len(), 4);
        assert_eq!(report.completed_sections(), 1);
        assert_eq!(report.sections[0].score, Some(85));
        assert_eq!(report.sections[1].score, None);
        assert_eq!(report.sections[1].progress, Some(60));
        assert_eq!(report.history.len(), 2);
        assert_eq!(report.profile.profile_type, "Visual-Dominant Learner");
    }

    #[test]
    fn retake_shows_score_it_would_replace() {
        let mut session = AssessmentSession::builtin();
        session.start_section(1).unwrap();
        let report = ResultsReport::from_session(&session);
        let row = &report.sections[0];
        assert_eq!(row.status, SectionStatus::InProgress);
        assert_eq!(row.score, None);
        assert_eq!(row.previous_score, Some(85));
        assert_eq!(row.score_label(), "0% answered (previous 85%)");
        assert_eq!(report.sections[1].score_label(), "60% answered");

        session.cancel_section();
        let report = ResultsReport::from_session(&session);
        assert_eq!(report.sections[0].previous_score, None);
        assert_eq!(report.sections[0].score_label(), "85%");
    }

    #[test]
    fn json_roundtrip() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: ResultsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.profile, report.profile);
        assert_eq!(back.history, report.history);
    }

    #[test]
    fn escapes_html() {
        assert_eq!(html_escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
    }
}
