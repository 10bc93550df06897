//! Markdown report generator.

use axelari_core::model::DimensionColor;

use crate::ResultsReport;

/// Render a results report as markdown.
pub fn generate_markdown(report: &ResultsReport) -> String {
    let mut md = String::new();
    let profile = &report.profile;

    md.push_str(&format!("# {}\n\n", profile.profile_type));
    md.push_str(&format!("{}\n\n", profile.description));
    md.push_str(&format!(
        "**Confidence:** {}% | **Sections completed:** {}/{}\n\n",
        profile.confidence_score,
        report.completed_sections(),
        report.sections.len()
    ));

    md.push_str("## Learning dimensions\n\n");
    md.push_str("| Dimension | Score | Percentile | Interval | |\n");
    md.push_str("|-----------|-------|------------|----------|---|\n");
    for d in &report.dimensions {
        let marker = match d.color {
            DimensionColor::Success => "strong",
            DimensionColor::Warning => "developing",
            DimensionColor::Default => "",
        };
        md.push_str(&format!(
            "| {} | {}% | {} | {}-{} | {} |\n",
            d.name,
            d.value,
            d.percentile,
            d.confidence_interval[0],
            d.confidence_interval[1],
            marker
        ));
    }
    md.push('\n');

    for (title, items) in [
        ("Strengths", &profile.strengths),
        ("Challenges", &profile.challenges),
        ("Recommendations", &profile.recommendations),
    ] {
        if items.is_empty() {
            continue;
        }
        md.push_str(&format!("## {title}\n\n"));
        for item in items {
            md.push_str(&format!("- {item}\n"));
        }
        md.push('\n');
    }

    if !profile.compatible_learning_paths.is_empty() {
        md.push_str("## Compatible learning paths\n\n");
        for path in &profile.compatible_learning_paths {
            md.push_str(&format!("- {} ({}% match)\n", path.name, path.score));
        }
        md.push('\n');
    }

    md.push_str("## Sections\n\n");
    md.push_str("| Section | Status | Score |\n");
    md.push_str("|---------|--------|-------|\n");
    for s in &report.sections {
        md.push_str(&format!("| {} | {} | {} |\n", s.name, s.status, s.score_label()));
    }
    md.push('\n');

    if !report.history.is_empty() {
        md.push_str("## History\n\n");
        for entry in &report.history {
            let dims: Vec<String> = entry
                .dimensions
                .iter()
                .map(|d| format!("{} {}%", d.name, d.score))
                .collect();
            md.push_str(&format!(
                "- **{}** {}: {}\n",
                entry.date.format("%Y-%m-%d"),
                entry.test_name,
                dims.join(", ")
            ));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_report;
    use axelari_core::model::SectionStatus;

    #[test]
    fn markdown_sections() {
        let md = generate_markdown(&sample_report());
        assert!(md.starts_with("# Visual-Dominant Learner"));
        assert!(md.contains("## Learning dimensions"));
        assert!(md.contains("| Visual | 85% |"));
        assert!(md.contains("| Cognitive Processing | in-progress | 60% answered |"));
        assert!(md.contains("- **2024-04-15** Learning Style Assessment: Visual 80%"));
    }

    #[test]
    fn running_retake_lists_previous_score() {
        let mut report = sample_report();
        let row = &mut report.sections[0];
        row.status = SectionStatus::InProgress;
        row.progress = Some(20);
        row.score = None;
        row.previous_score = Some(85);
        let md = generate_markdown(&report);
        assert!(md.contains("| Learning Style Assessment | in-progress | 20% answered (previous 85%) |"));
    }

    #[test]
    fn empty_lists_are_skipped() {
        let mut report = sample_report();
        report.profile.challenges.clear();
        report.history.clear();
        let md = generate_markdown(&report);
        assert!(!md.contains("## Challenges"));
        assert!(!md.contains("## History"));
    }
}
