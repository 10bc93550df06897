//! Built-in question bank and seed data.
//!
//! The bank maps a section id to its ordered questions. The seed holds the
//! section catalog, starting profile, dimensions and history a fresh session
//! is created from.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    AnswerOption, CompatibleLearningPath, DimensionColor, DimensionScore, HistoricalEntry,
    LearningDimension, LearningProfile, Question, Reliability, Section, SectionResult,
    SectionStatus,
};

/// Static lookup from section id to its ordered questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    sections: BTreeMap<u32, Vec<Question>>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the questions for a section.
    pub fn insert(&mut self, section_id: u32, questions: Vec<Question>) {
        self.sections.insert(section_id, questions);
    }

    /// Questions for a section. Unknown sections have no questions.
    pub fn questions(&self, section_id: u32) -> &[Question] {
        self.sections
            .get(&section_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn question(&self, section_id: u32, question_id: u32) -> Option<&Question> {
        self.questions(section_id)
            .iter()
            .find(|q| q.id == question_id)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.sections.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Merge another bank into this one, replacing sections with the same id.
    pub fn extend(&mut self, other: QuestionBank) {
        self.sections.extend(other.sections);
    }

    /// The bank shipped with the application.
    pub fn builtin() -> Self {
        let mut bank = Self::new();
        bank.insert(
            1,
            vec![
                question(
                    1,
                    "When learning something new, I prefer to:",
                    "Visual",
                    &[
                        ("See diagrams, charts, or demonstrations", 100),
                        ("Hear a detailed explanation", 25),
                        ("Read detailed instructions", 50),
                        ("Try it out myself through hands-on practice", 75),
                    ],
                ),
                question(
                    2,
                    "I remember information best when:",
                    "Auditory",
                    &[
                        ("I listen to someone explain it", 100),
                        ("I see it written or illustrated", 25),
                        ("I discuss it with others", 75),
                        ("I practice doing it", 50),
                    ],
                ),
                question(
                    3,
                    "When solving a problem, I tend to:",
                    "Reading/Writing",
                    &[
                        ("Write down the key points and process", 100),
                        ("Talk through the problem out loud", 50),
                        ("Create a mental image or diagram", 25),
                        ("Use trial and error", 75),
                    ],
                ),
                question(
                    4,
                    "I find it easiest to follow:",
                    "Kinesthetic",
                    &[
                        ("Step-by-step demonstrations I can follow along with", 100),
                        ("Verbal instructions and explanations", 25),
                        ("Written instructions with diagrams", 50),
                        ("My intuition after seeing an example", 75),
                    ],
                ),
                question(
                    5,
                    "When recalling a past event, I most easily remember:",
                    "Visual",
                    &[
                        ("The visual details and how things looked", 100),
                        ("The conversations and sounds", 25),
                        ("The emotions and feelings I experienced", 75),
                        ("What I read about it later", 50),
                    ],
                ),
            ],
        );
        bank.insert(
            2,
            vec![
                question(
                    1,
                    "When faced with a complex problem, I typically:",
                    "Working Memory",
                    &[
                        ("Break it down into smaller, manageable parts", 100),
                        ("Tackle the whole problem at once", 25),
                        (
                            "Look for patterns or similarities to problems I've solved before",
                            75,
                        ),
                        ("Discuss it with someone else to clarify my thinking", 50),
                    ],
                ),
                question(
                    2,
                    "When working through a multi-step process, I:",
                    "Processing Speed",
                    &[
                        ("Complete steps quickly once I understand them", 100),
                        ("Take my time to ensure accuracy at each step", 50),
                        ("Often skip ahead if I see the pattern", 75),
                        ("Prefer to work slowly and methodically", 25),
                    ],
                ),
            ],
        );
        bank.insert(
            3,
            vec![
                question(
                    1,
                    "When studying or working, I typically:",
                    "Sustained Attention",
                    &[
                        ("Can focus intensely for long periods without breaks", 100),
                        ("Need frequent short breaks to maintain productivity", 50),
                        (
                            "Start strong but find my attention drifting after 20-30 minutes",
                            75,
                        ),
                        (
                            "Work best in short bursts with frequent changes in activity",
                            25,
                        ),
                    ],
                ),
                question(
                    2,
                    "When there are distractions around me, I:",
                    "Distraction Sensitivity",
                    &[
                        ("Barely notice them and maintain focus easily", 100),
                        ("Am highly aware of them but can usually ignore them", 75),
                        ("Find my attention pulled away but can redirect myself", 50),
                        ("Find it very difficult to maintain concentration", 25),
                    ],
                ),
            ],
        );
        bank.insert(
            4,
            vec![
                question(
                    1,
                    "After learning something new, I typically:",
                    "Short-term Memory",
                    &[
                        ("Can recall specific details immediately after learning", 100),
                        ("Remember the general concept but not all details", 75),
                        ("Need to review it once or twice to solidify it", 50),
                        ("Need multiple reviews before I feel confident", 25),
                    ],
                ),
                question(
                    2,
                    "When recalling information I learned months ago, I:",
                    "Long-term Memory",
                    &[
                        ("Can recall it in detail with little effort", 100),
                        ("Remember the main points but not specific details", 75),
                        ("Need some prompts to fully recall", 50),
                        ("Often need to relearn significant portions", 25),
                    ],
                ),
            ],
        );
        bank
    }
}

fn question(id: u32, text: &str, dimension: &str, options: &[(&str, u8)]) -> Question {
    Question {
        id,
        text: text.to_string(),
        dimension: dimension.to_string(),
        options: options
            .iter()
            .map(|(text, weight)| AnswerOption {
                text: text.to_string(),
                weight: *weight,
            })
            .collect(),
    }
}

/// Initial state a session is created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub sections: Vec<Section>,
    pub profile: LearningProfile,
    pub dimensions: Vec<LearningDimension>,
    /// Newest first.
    pub history: Vec<HistoricalEntry>,
}

impl SeedData {
    /// Seed state shipped with the application.
    pub fn builtin() -> Self {
        Self {
            sections: builtin_sections(),
            profile: builtin_profile(),
            dimensions: builtin_dimensions(),
            history: builtin_history(),
        }
    }

    /// Seed with every section reset to not-started and no history.
    pub fn fresh() -> Self {
        let sections = builtin_sections()
            .into_iter()
            .map(|s| Section {
                status: SectionStatus::NotStarted,
                progress: None,
                result: None,
                previous_result: None,
                ..s
            })
            .collect();
        Self {
            sections,
            profile: builtin_profile(),
            dimensions: builtin_dimensions(),
            history: Vec::new(),
        }
    }
}

fn section(id: u32, name: &str, description: &str, duration: &str, questions: u32) -> Section {
    Section {
        id,
        name: name.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        question_count: questions,
        status: SectionStatus::NotStarted,
        progress: None,
        result: None,
        previous_result: None,
    }
}

fn dims(scores: &[(&str, u32)]) -> Vec<DimensionScore> {
    scores
        .iter()
        .map(|(name, score)| DimensionScore::new(*name, *score))
        .collect()
}

fn builtin_sections() -> Vec<Section> {
    let mut learning_style = section(
        1,
        "Learning Style Assessment",
        "Identify your preferred ways of processing and retaining information",
        "15 min",
        20,
    );
    learning_style.status = SectionStatus::Completed;
    learning_style.result = Some(SectionResult {
        score: 85,
        dimensions: dims(&[
            ("Visual", 85),
            ("Auditory", 45),
            ("Reading/Writing", 60),
            ("Kinesthetic", 70),
            ("Social Learning", 55),
            ("Solitary Learning", 75),
        ]),
        reliability: Some(Reliability {
            cronbach_alpha: 0.87,
            confidence_interval: [79, 91],
        }),
    });

    let mut cognitive = section(
        2,
        "Cognitive Processing",
        "Measure how you process complex information and solve problems",
        "25 min",
        30,
    );
    cognitive.status = SectionStatus::InProgress;
    cognitive.progress = Some(60);

    vec![
        learning_style,
        cognitive,
        section(
            3,
            "Focus & Attention Span",
            "Analyze your attention patterns and optimal focus duration",
            "20 min",
            25,
        ),
        section(
            4,
            "Information Retention",
            "Evaluate how you retain information over different time periods",
            "30 min",
            35,
        ),
    ]
}

fn builtin_profile() -> LearningProfile {
    LearningProfile {
        profile_type: "Visual-Spatial Learner".into(),
        description: "You learn best through visual aids, spatial relationships, and when content is presented with strong visual elements.".into(),
        confidence_score: 92,
        strengths: vec![
            "Processing visual information quickly".into(),
            "Understanding spatial relationships".into(),
            "Creative problem solving".into(),
            "Big picture thinking".into(),
            "Intuitive understanding of complex systems".into(),
        ],
        challenges: vec![
            "Processing lengthy text without visuals".into(),
            "Following sequential instructions".into(),
            "Time management during tasks".into(),
            "Maintaining focus during purely auditory lectures".into(),
        ],
        recommendations: vec![
            "Use concept maps and diagrams".into(),
            "Convert text information to visual formats".into(),
            "Study in environments with minimal visual distractions".into(),
            "Use color coding for organization".into(),
            "Leverage visualization techniques for memorization".into(),
            "Seek interactive learning materials with strong visual elements".into(),
        ],
        compatible_learning_paths: vec![
            CompatibleLearningPath {
                id: 1,
                name: "Data Visualization Specialist".into(),
                score: 94,
            },
            CompatibleLearningPath {
                id: 2,
                name: "UX/UI Design Fundamentals".into(),
                score: 89,
            },
            CompatibleLearningPath {
                id: 3,
                name: "Architecture & Spatial Computing".into(),
                score: 86,
            },
        ],
    }
}

fn builtin_dimensions() -> Vec<LearningDimension> {
    [
        ("Visual", 85, DimensionColor::Default, 92, [80, 90]),
        ("Auditory", 45, DimensionColor::Default, 62, [40, 50]),
        ("Reading/Writing", 60, DimensionColor::Default, 75, [55, 65]),
        ("Kinesthetic", 70, DimensionColor::Default, 84, [65, 75]),
        ("Sequential", 40, DimensionColor::Warning, 35, [35, 45]),
        ("Global", 75, DimensionColor::Success, 88, [70, 80]),
        ("Active", 65, DimensionColor::Success, 78, [60, 70]),
        ("Reflective", 55, DimensionColor::Default, 65, [50, 60]),
    ]
    .into_iter()
    .map(
        |(name, value, color, percentile, confidence_interval)| LearningDimension {
            name: name.to_string(),
            value,
            color,
            percentile,
            confidence_interval,
        },
    )
    .collect()
}

fn builtin_history() -> Vec<HistoricalEntry> {
    vec![
        HistoricalEntry {
            date: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap_or_default(),
            test_name: "Learning Style Assessment".into(),
            dimensions: dims(&[
                ("Visual", 80),
                ("Auditory", 42),
                ("Reading/Writing", 58),
                ("Kinesthetic", 67),
            ]),
        },
        HistoricalEntry {
            date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap_or_default(),
            test_name: "Learning Style Assessment".into(),
            dimensions: dims(&[
                ("Visual", 78),
                ("Auditory", 40),
                ("Reading/Writing", 55),
                ("Kinesthetic", 65),
            ]),
        },
    ]
}
