//! The `axelari results` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use axelari_core::notify::NoopNotifier;
use axelari_report::html::{generate_html, write_html_report};
use axelari_report::markdown::generate_markdown;
use axelari_report::ResultsReport;

use super::{emit, Paths, Workspace};

pub fn execute(paths: &Paths, format: String, output: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::load(paths)?;
    let session = workspace.open_session(Arc::new(NoopNotifier))?;

    if !session.has_completed_sections() {
        println!("No completed sections yet. Run `axelari take --section <id>` to begin.");
        return Ok(());
    }

    let report = ResultsReport::from_session(&session);
    if let ("html", Some(path)) = (format.as_str(), output.as_deref()) {
        write_html_report(&report, path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let content = match format.as_str() {
        "json" => serde_json::to_string_pretty(&report)?,
        "markdown" | "md" => generate_markdown(&report),
        "html" => generate_html(&report),
        "text" => render_text(&report),
        other => anyhow::bail!("unknown format: {other} (expected text, json, markdown or html)"),
    };

    emit(&content, output.as_deref())
}

fn render_text(report: &ResultsReport) -> String {
    let profile = &report.profile;
    let mut out = format!(
        "{}\n{}\nConfidence: {}%\n\n",
        profile.profile_type, profile.description, profile.confidence_score
    );

    let mut table = Table::new();
    table.set_header(vec!["Dimension", "Score", "Percentile", "Interval"]);
    for d in &report.dimensions {
        table.add_row(vec![
            Cell::new(&d.name),
            Cell::new(format!("{}%", d.value)),
            Cell::new(d.percentile),
            Cell::new(format!(
                "{}-{}",
                d.confidence_interval[0], d.confidence_interval[1]
            )),
        ]);
    }
    out.push_str(&format!("{table}\n"));

    for (title, items) in [
        ("Strengths", &profile.strengths),
        ("Challenges", &profile.challenges),
        ("Recommendations", &profile.recommendations),
    ] {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{title}:\n"));
        for item in items {
            out.push_str(&format!("  - {item}\n"));
        }
    }

    if !profile.compatible_learning_paths.is_empty() {
        out.push_str("\nCompatible learning paths:\n");
        for path in &profile.compatible_learning_paths {
            out.push_str(&format!("  - {} ({}% match)\n", path.name, path.score));
        }
    }
    out
}
