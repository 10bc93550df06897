//! Core data model types for the assessment engine.
//!
//! These are the types every other module passes around: questions and their
//! weighted options, assessment sections with their lifecycle status, and the
//! derived profile, dimension, and history records shown on results screens.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest weight a single answer option may carry.
pub const MAX_WEIGHT: u8 = 100;

/// Fallback duration when a section's duration string carries no number.
pub const DEFAULT_DURATION_SECS: u64 = 900;

/// A single question within a section's question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within its section.
    pub id: u32,
    /// Prompt shown to the test taker.
    pub text: String,
    /// Dimension this question contributes evidence toward (e.g. "Visual").
    pub dimension: String,
    /// Ordered answer options.
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Returns `true` if `weight` is the weight of one of this question's options.
    pub fn accepts_weight(&self, weight: u8) -> bool {
        self.options.iter().any(|o| o.weight == weight)
    }
}

/// One selectable answer with its display text and weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    /// Points in `0..=100` signalling how strongly this choice indicates the dimension.
    pub weight: u8,
}

/// Lifecycle status of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionStatus::NotStarted => write!(f, "not-started"),
            SectionStatus::InProgress => write!(f, "in-progress"),
            SectionStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for SectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "not-started" => Ok(SectionStatus::NotStarted),
            "in-progress" => Ok(SectionStatus::InProgress),
            "completed" => Ok(SectionStatus::Completed),
            other => Err(format!("unknown section status: {other}")),
        }
    }
}

/// Score reported for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub name: String,
    /// Always within `0..=100`.
    pub score: u8,
}

impl DimensionScore {
    /// Build a dimension score, clamping to `0..=100`.
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score: clamp_percent(score),
        }
    }
}

/// Statistical reliability block attached to a completed section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reliability {
    /// Internal-consistency coefficient.
    pub cronbach_alpha: f64,
    /// `[low, high]` bracket around the section score.
    pub confidence_interval: [u8; 2],
}

/// Outcome of a completed attempt at a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    /// Completion score in `0..=100`.
    pub score: u8,
    pub dimensions: Vec<DimensionScore>,
    #[serde(default)]
    pub reliability: Option<Reliability>,
}

/// One assessment category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Nominal duration as a human string, e.g. "15 min".
    pub duration: String,
    /// Nominal question count shown in the catalog.
    pub question_count: u32,
    pub status: SectionStatus,
    /// Percentage of the current attempt answered, when one has been made.
    #[serde(default)]
    pub progress: Option<u8>,
    /// Latest result. Present exactly when `status` is `Completed`.
    #[serde(default)]
    pub result: Option<SectionResult>,
    /// Result of the attempt before a retake, kept readable until resubmission.
    #[serde(default)]
    pub previous_result: Option<SectionResult>,
}

impl Section {
    pub fn score(&self) -> Option<u8> {
        self.result.as_ref().map(|r| r.score)
    }

    pub fn dimensions(&self) -> Option<&[DimensionScore]> {
        self.result.as_ref().map(|r| r.dimensions.as_slice())
    }

    pub fn is_completed(&self) -> bool {
        self.status == SectionStatus::Completed
    }

    /// Nominal duration converted to seconds.
    pub fn duration_secs(&self) -> u64 {
        parse_duration_secs(&self.duration)
    }

    /// Returns `true` if a result is stored exactly when the section is completed.
    pub fn is_consistent(&self) -> bool {
        self.result.is_some() == self.is_completed()
    }
}

/// A learning path suggested by the profile aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibleLearningPath {
    pub id: u32,
    pub name: String,
    /// Match score in `0..=100`.
    pub score: u8,
}

/// Human-readable interpretation of the aggregated dimension scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProfile {
    #[serde(rename = "type")]
    pub profile_type: String,
    pub description: String,
    pub confidence_score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub compatible_learning_paths: Vec<CompatibleLearningPath>,
}

/// Display color category for a learning dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionColor {
    #[default]
    Default,
    Success,
    Warning,
}

impl DimensionColor {
    /// Color category for an aggregated value.
    pub fn for_value(value: u8) -> Self {
        if value < 50 {
            DimensionColor::Warning
        } else if value >= 75 {
            DimensionColor::Success
        } else {
            DimensionColor::Default
        }
    }
}

impl fmt::Display for DimensionColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionColor::Default => write!(f, "default"),
            DimensionColor::Success => write!(f, "success"),
            DimensionColor::Warning => write!(f, "warning"),
        }
    }
}

/// Global, display-oriented learning dimension averaged across completed sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningDimension {
    pub name: String,
    pub value: u8,
    pub color: DimensionColor,
    pub percentile: u8,
    pub confidence_interval: [u8; 2],
}

/// Snapshot of one completed test, kept in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalEntry {
    pub date: NaiveDate,
    pub test_name: String,
    pub dimensions: Vec<DimensionScore>,
}

/// Clamp an integer into the `0..=100` percentage range.
pub fn clamp_percent(value: u32) -> u8 {
    value.min(100) as u8
}

/// Convert a human duration such as "15 min" into seconds.
///
/// The first run of digits is read as minutes. Strings without digits fall
/// back to [`DEFAULT_DURATION_SECS`].
pub fn parse_duration_secs(duration: &str) -> u64 {
    let digits: String = duration
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits
        .parse::<u64>()
        .map(|mins| mins.saturating_mul(60))
        .unwrap_or(DEFAULT_DURATION_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_duration_secs("15 min"), 900);
        assert_eq!(parse_duration_secs("25 min"), 1500);
        assert_eq!(parse_duration_secs("about 1 minute"), 60);
        assert_eq!(parse_duration_secs("untimed"), DEFAULT_DURATION_SECS);
        assert_eq!(parse_duration_secs(""), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn status_display_and_parse() {
        assert_eq!(SectionStatus::InProgress.to_string(), "in-progress");
        assert_eq!(
            "not_started".parse::<SectionStatus>().unwrap(),
            SectionStatus::NotStarted
        );
        assert_eq!(
            "Completed".parse::<SectionStatus>().unwrap(),
            SectionStatus::Completed
        );
        assert!("paused".parse::<SectionStatus>().is_err());
    }

    #[test]
    fn dimension_score_clamps() {
        assert_eq!(DimensionScore::new("Visual", 140).score, 100);
        assert_eq!(DimensionScore::new("Visual", 42).score, 42);
    }

    #[test]
    fn color_bands() {
        assert_eq!(DimensionColor::for_value(49), DimensionColor::Warning);
        assert_eq!(DimensionColor::for_value(50), DimensionColor::Default);
        assert_eq!(DimensionColor::for_value(74), DimensionColor::Default);
        assert_eq!(DimensionColor::for_value(75), DimensionColor::Success);
    }

    #[test]
    fn section_serializes_status_kebab_case() {
        let section = Section {
            id: 3,
            name: "Focus & Attention Span".into(),
            description: String::new(),
            duration: "20 min".into(),
            question_count: 25,
            status: SectionStatus::NotStarted,
            progress: None,
            result: None,
            previous_result: None,
        };
        let json = serde_json::to_string(&section).unwrap();
        assert!(json.contains("\"not-started\""));
        assert!(section.is_consistent());
        assert_eq!(section.duration_secs(), 1200);
    }

    #[test]
    fn profile_type_field_renamed() {
        let profile = LearningProfile {
            profile_type: "Visual-Dominant Learner".into(),
            description: String::new(),
            confidence_score: 75,
            strengths: vec![],
            challenges: vec![],
            recommendations: vec![],
            compatible_learning_paths: vec![],
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["type"], "Visual-Dominant Learner");
    }
}
