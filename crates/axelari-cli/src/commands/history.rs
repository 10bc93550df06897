//! The `axelari history` command.

use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use axelari_core::notify::NoopNotifier;
use axelari_core::trend::TrendReport;

use super::{Paths, Workspace};

pub fn execute(
    paths: &Paths,
    compare: Option<String>,
    threshold: u8,
    format: String,
) -> Result<()> {
    let workspace = Workspace::load(paths)?;
    let session = workspace.open_session(Arc::new(NoopNotifier))?;
    let history = session.history();

    let Some(test_name) = compare else {
        if history.is_empty() {
            println!("No completed tests yet.");
            return Ok(());
        }
        let mut table = Table::new();
        table.set_header(vec!["Date", "Test", "Dimensions"]);
        for entry in history.iter() {
            let dims: Vec<String> = entry
                .dimensions
                .iter()
                .map(|d| format!("{} {}%", d.name, d.score))
                .collect();
            table.add_row(vec![
                Cell::new(entry.date.format("%Y-%m-%d")),
                Cell::new(&entry.test_name),
                Cell::new(dims.join(", ")),
            ]);
        }
        println!("{table}");
        return Ok(());
    };

    let Some(report) = TrendReport::latest(history, &test_name, threshold) else {
        anyhow::bail!("need at least two '{test_name}' entries to compare");
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "text" => print_text(&report),
        other => anyhow::bail!("unknown format: {other} (expected text, json or markdown)"),
    }
    Ok(())
}

fn print_text(report: &TrendReport) {
    println!(
        "{}: {} -> {}",
        report.test_name,
        report.baseline.date.format("%Y-%m-%d"),
        report.current.date.format("%Y-%m-%d")
    );
    println!(
        "Improvements: {} | Declines: {} | Unchanged: {}",
        report.improvements.len(),
        report.declines.len(),
        report.unchanged
    );

    for (label, changes) in [("+", &report.improvements), ("-", &report.declines)] {
        for c in changes {
            println!(
                "  {label} {}: {}% -> {}% ({:+})",
                c.dimension, c.baseline, c.current, c.delta
            );
        }
    }
    if report.new_dimensions > 0 || report.dropped_dimensions > 0 {
        println!(
            "  {} new, {} dropped dimension(s)",
            report.new_dimensions, report.dropped_dimensions
        );
    }
}
