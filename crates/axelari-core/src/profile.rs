//! Profile aggregation across completed sections.
//!
//! Dimension scores from every completed section are grouped by name and
//! averaged. The highest average becomes the dominant dimension, which labels
//! the learning profile and seeds its path suggestions. The output always
//! replaces the previous profile and dimension list as a whole.

use serde::{Deserialize, Serialize};

use crate::metadata::MetadataGenerator;
use crate::model::{
    CompatibleLearningPath, DimensionColor, LearningDimension, LearningProfile, Section,
};
use crate::scoring::rounded_mean;

/// Base confidence before any completed section is counted.
const BASE_CONFIDENCE: u32 = 70;
/// Confidence added per completed section.
const CONFIDENCE_PER_SECTION: u32 = 5;
/// Values at or above this count as strengths.
const STRENGTH_THRESHOLD: u8 = 60;
/// Values below this count as challenges.
const CHALLENGE_THRESHOLD: u8 = 50;
const MAX_LISTED: usize = 3;

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub profile: LearningProfile,
    pub dimensions: Vec<LearningDimension>,
}

/// Average dimension scores across completed sections, keeping the order in
/// which names are first encountered.
pub fn average_dimensions(sections: &[Section]) -> Vec<(String, u8)> {
    let mut groups: Vec<(String, Vec<u8>)> = Vec::new();
    for section in sections.iter().filter(|s| s.is_completed()) {
        for dim in section.dimensions().unwrap_or_default() {
            match groups.iter_mut().find(|(name, _)| *name == dim.name) {
                Some((_, scores)) => scores.push(dim.score),
                None => groups.push((dim.name.clone(), vec![dim.score])),
            }
        }
    }

    groups
        .into_iter()
        .map(|(name, scores)| {
            let mean = rounded_mean(&scores);
            (name, mean)
        })
        .collect()
}

/// The dimension with the highest value. Ties go to the lexicographically
/// smallest name.
pub fn dominant_dimension(dimensions: &[LearningDimension]) -> Option<&LearningDimension> {
    dimensions.iter().min_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then_with(|| a.name.cmp(&b.name))
    })
}

/// Recompute the profile and dimension list from the completed sections.
///
/// Returns `None` when no section is completed; callers keep whatever they
/// showed before.
pub fn aggregate(sections: &[Section], metadata: &mut MetadataGenerator) -> Option<Aggregate> {
    let completed = sections.iter().filter(|s| s.is_completed()).count();
    if completed == 0 {
        return None;
    }

    let dimensions: Vec<LearningDimension> = average_dimensions(sections)
        .into_iter()
        .map(|(name, value)| LearningDimension {
            color: DimensionColor::for_value(value),
            percentile: metadata.percentile(value),
            confidence_interval: metadata.confidence_interval(value),
            name,
            value,
        })
        .collect();

    let dominant = dominant_dimension(&dimensions)?;
    tracing::debug!(
        dominant = %dominant.name,
        value = dominant.value,
        completed,
        "recomputed learning profile"
    );

    let profile = LearningProfile {
        profile_type: format!("{}-Dominant Learner", dominant.name),
        description: format!(
            "Your learning style is predominantly characterized by strong {} capabilities. \
             This shapes how you process and retain information most effectively.",
            dominant.name
        ),
        confidence_score: confidence_score(completed),
        strengths: strengths(&dimensions),
        challenges: challenges(&dimensions),
        recommendations: recommendations(&dominant.name),
        compatible_learning_paths: compatible_paths(&dominant.name, dominant.value, metadata),
    };

    Some(Aggregate {
        profile,
        dimensions,
    })
}

/// `70 + 5 · completed`, capped at 100.
pub fn confidence_score(completed_sections: usize) -> u8 {
    let raw = BASE_CONFIDENCE + CONFIDENCE_PER_SECTION * completed_sections as u32;
    raw.min(100) as u8
}

fn ranked(dimensions: &[LearningDimension]) -> Vec<&LearningDimension> {
    let mut sorted: Vec<&LearningDimension> = dimensions.iter().collect();
    sorted.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    sorted
}

fn strengths(dimensions: &[LearningDimension]) -> Vec<String> {
    ranked(dimensions)
        .into_iter()
        .filter(|d| d.value >= STRENGTH_THRESHOLD)
        .take(MAX_LISTED)
        .map(|d| format!("Strong {} processing ({}%)", d.name, d.value))
        .collect()
}

fn challenges(dimensions: &[LearningDimension]) -> Vec<String> {
    ranked(dimensions)
        .into_iter()
        .rev()
        .filter(|d| d.value < CHALLENGE_THRESHOLD)
        .take(MAX_LISTED)
        .map(|d| format!("Developing {} skills ({}%)", d.name, d.value))
        .collect()
}

fn recommendations(dominant: &str) -> Vec<String> {
    let specific: &[&str] = match dominant {
        "Visual" | "Visual Retention" => &[
            "Use concept maps and diagrams",
            "Convert text information to visual formats",
            "Use color coding for organization",
        ],
        "Auditory" | "Auditory Retention" => &[
            "Record and replay explanations of key concepts",
            "Discuss new material out loud with a study partner",
            "Use mnemonic rhymes for lists and sequences",
        ],
        "Reading/Writing" => &[
            "Rewrite lecture notes in your own words",
            "Summarize each chapter in a short written outline",
            "Keep a learning journal",
        ],
        "Kinesthetic" => &[
            "Prefer labs, exercises and hands-on projects",
            "Build small prototypes while studying theory",
            "Take movement breaks between study blocks",
        ],
        "Working Memory" | "Processing Speed" | "Pattern Recognition" => &[
            "Break complex problems into smaller steps",
            "Practice timed problem sets to build fluency",
            "Look for recurring patterns across exercises",
        ],
        "Sustained Attention" | "Distraction Sensitivity" | "Focus Intensity" => &[
            "Schedule focused sessions with planned breaks",
            "Study in environments with minimal distractions",
            "Track your best hours of the day for deep work",
        ],
        "Short-term Memory" | "Long-term Memory" | "Spaced Repetition Interval" => &[
            "Review material using spaced repetition",
            "Test yourself with active recall instead of rereading",
            "Connect new facts to things you already know",
        ],
        _ => &[],
    };

    let mut recs: Vec<String> = specific.iter().map(|s| s.to_string()).collect();
    recs.push(format!(
        "Seek learning materials that play to your {dominant} strengths"
    ));
    recs
}

fn compatible_paths(
    dominant: &str,
    dominant_value: u8,
    metadata: &mut MetadataGenerator,
) -> Vec<CompatibleLearningPath> {
    let tracks: [(String, f64, f64); 3] = [
        (format!("{dominant}-Optimized Learning Path"), 70.0, 20.0),
        ("Balanced Cognitive Development".to_string(), 65.0, 15.0),
        ("Advanced Problem-Solving Track".to_string(), 60.0, 25.0),
    ];

    tracks
        .into_iter()
        .enumerate()
        .map(|(idx, (name, base, span))| {
            let strength = metadata.path_strength(dominant_value);
            CompatibleLearningPath {
                id: idx as u32 + 1,
                name,
                score: (base + span * strength).round().min(100.0) as u8,
            }
        })
        .collect()
}
