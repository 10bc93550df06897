//! Standalone HTML results page.
//!
//! Styles and the history sorting script are embedded, so the file can be
//! opened or shared without any other assets.

use anyhow::{Context, Result};
use std::path::Path;

use axelari_core::model::{DimensionColor, LearningDimension};

use crate::{html_escape, ResultsReport};

/// Generate an HTML page from a results report.
pub fn generate_html(report: &ResultsReport) -> String {
    let mut html = String::new();

    html.push_str(concat!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
        "<meta charset=\"utf-8\">\n",
        "<meta name=\"viewport\" content=\"width=device-width\">\n",
    ));
    html.push_str(&format!(
        "<title>axelari results: {}</title>\n",
        html_escape(&report.profile.profile_type)
    ));
    html.push_str(&format!("<style>{CSS}</style>\n</head>\n<body>\n"));

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Assessment results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} of {} sections completed | {}</p>\n",
        report.completed_sections(),
        report.sections.len(),
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Profile
    let profile = &report.profile;
    html.push_str("<section class=\"profile\">\n");
    html.push_str(&format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p class=\"meta\">Confidence: <strong>{}%</strong></p>\n",
        html_escape(&profile.profile_type),
        html_escape(&profile.description),
        profile.confidence_score
    ));
    for (title, items) in [
        ("Strengths", &profile.strengths),
        ("Challenges", &profile.challenges),
        ("Recommendations", &profile.recommendations),
    ] {
        if items.is_empty() {
            continue;
        }
        html.push_str(&format!("<h3>{title}</h3>\n<ul>\n"));
        for item in items {
            html.push_str(&format!("<li>{}</li>\n", html_escape(item)));
        }
        html.push_str("</ul>\n");
    }

    if !profile.compatible_learning_paths.is_empty() {
        html.push_str("<h3>Compatible learning paths</h3>\n<table>\n");
        html.push_str("<thead><tr><th>Path</th><th>Match</th></tr></thead>\n<tbody>\n");
        for path in &profile.compatible_learning_paths {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}%</td></tr>\n",
                html_escape(&path.name),
                path.score
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Dimensions
    html.push_str("<section class=\"dimensions\">\n");
    html.push_str("<h2>Learning dimensions</h2>\n");
    if !report.dimensions.is_empty() {
        html.push_str(&generate_bar_chart(&report.dimensions));
    }
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Dimension</th><th>Score</th><th>Percentile</th><th>Confidence interval</th></tr></thead>\n<tbody>\n");
    for d in &report.dimensions {
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}%</td><td>{}</td><td>{}-{}</td></tr>\n",
            color_class(d.color),
            html_escape(&d.name),
            d.value,
            d.percentile,
            d.confidence_interval[0],
            d.confidence_interval[1]
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Sections
    html.push_str("<section class=\"sections\">\n");
    html.push_str("<h2>Sections</h2>\n<table>\n");
    html.push_str("<thead><tr><th>Section</th><th>Status</th><th>Score</th><th>Reliability (α)</th></tr></thead>\n<tbody>\n");
    for s in &report.sections {
        let score = s.score_label();
        let alpha = s
            .reliability
            .as_ref()
            .map(|r| format!("{:.2}", r.cronbach_alpha))
            .unwrap_or_else(|| "-".into());
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&s.name),
            s.status,
            score,
            alpha
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // History
    html.push_str("<section class=\"history\">\n");
    html.push_str("<h2>History</h2>\n");
    if report.history.is_empty() {
        html.push_str("<p class=\"meta\">No completed tests yet.</p>\n");
    } else {
        html.push_str("<table class=\"history-table\" id=\"history\">\n");
        html.push_str("<thead><tr><th data-col=\"0\">Date</th><th data-col=\"1\">Test</th><th>Dimensions</th></tr></thead>\n<tbody>\n");
        for entry in &report.history {
            let dims: Vec<String> = entry
                .dimensions
                .iter()
                .map(|d| format!("{} {}%", html_escape(&d.name), d.score))
                .collect();
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                entry.date.format("%Y-%m-%d"),
                html_escape(&entry.test_name),
                dims.join(", ")
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    let json = serde_json::to_string_pretty(report).unwrap_or_default();
    html.push_str(&format!(
        "<section class=\"raw\">\n<details><summary>Report JSON</summary>\n<pre>{}</pre>\n</details>\n</section>\n",
        html_escape(&json)
    ));

    html.push_str(&format!("<script>{JS}</script>\n</body>\n</html>\n"));
    html
}

/// Render `report` and write it to `path`, creating parent directories.
pub fn write_html_report(report: &ResultsReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn color_class(color: DimensionColor) -> &'static str {
    match color {
        DimensionColor::Success => "success",
        DimensionColor::Warning => "warning",
        DimensionColor::Default => "neutral",
    }
}

fn bar_fill(color: DimensionColor) -> &'static str {
    match color {
        DimensionColor::Success => "#22c55e",
        DimensionColor::Warning => "#eab308",
        DimensionColor::Default => "#3b82f6",
    }
}

/// Horizontal bars, one row per dimension, scaled to 0..=100.
fn generate_bar_chart(dimensions: &[LearningDimension]) -> String {
    const ROW: usize = 32;
    const LABEL: usize = 180;
    const TRACK: usize = 360;

    let height = dimensions.len() * ROW + 8;
    let mut svg = format!(
        "<svg class=\"chart\" viewBox=\"0 0 {} {height}\" role=\"img\" aria-label=\"Dimension scores\">\n",
        LABEL + TRACK + 56
    );

    for (row, d) in dimensions.iter().enumerate() {
        let top = row * ROW + 4;
        let filled = usize::from(d.value) * TRACK / 100;
        svg.push_str(&format!(
            "  <g transform=\"translate(0 {top})\">\n    <text x=\"{}\" y=\"16\" text-anchor=\"end\" fill=\"currentColor\">{}</text>\n",
            LABEL - 8,
            html_escape(&d.name)
        ));
        svg.push_str(&format!(
            "    <rect x=\"{LABEL}\" y=\"4\" width=\"{TRACK}\" height=\"18\" fill=\"none\" stroke=\"currentColor\" stroke-opacity=\"0.2\"/>\n    <rect x=\"{LABEL}\" y=\"4\" width=\"{filled}\" height=\"18\" fill=\"{}\"/>\n",
            bar_fill(d.color)
        ));
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"18\" fill=\"currentColor\">{}%</text>\n  </g>\n",
            LABEL + TRACK + 8,
            d.value
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root {
  --page: #f8fafc; --ink: #0f172a; --muted: #64748b; --rule: #cbd5e1;
  --strong: #d1fae5; --developing: #fef3c7;
}
@media (prefers-color-scheme: dark) {
  :root { --page: #0f172a; --ink: #e2e8f0; --muted: #94a3b8; --rule: #334155; --strong: #065f46; --developing: #78350f; }
}
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 1.5rem; background: var(--page); color: var(--ink); }
section { margin-top: 2.5rem; }
.meta { color: var(--muted); }
table { border-collapse: collapse; width: 100%; }
th { text-align: left; border-bottom: 2px solid var(--rule); padding: 0.4rem 0.75rem; }
td { border-bottom: 1px solid var(--rule); padding: 0.4rem 0.75rem; }
#history th[data-col] { cursor: pointer; user-select: none; }
tr.success td { background: var(--strong); }
tr.warning td { background: var(--developing); }
pre { overflow: auto; max-height: 24rem; padding: 0.75rem; border: 1px solid var(--rule); border-radius: 6px; }
summary { cursor: pointer; color: var(--muted); }
"#;

const JS: &str = r#"
document.querySelectorAll('#history th[data-col]').forEach(th => {
  th.addEventListener('click', () => {
    const body = document.querySelector('#history tbody');
    const col = Number(th.dataset.col);
    const desc = th.dataset.order !== 'desc';
    th.dataset.order = desc ? 'desc' : 'asc';
    [...body.rows]
      .sort((x, y) => {
        const cmp = x.cells[col].innerText.localeCompare(y.cells[col].innerText);
        return desc ? -cmp : cmp;
      })
      .forEach(row => body.append(row));
  });
});
"#;
