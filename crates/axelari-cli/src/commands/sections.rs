//! The `axelari sections` command.

use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use axelari_core::notify::NoopNotifier;
use axelari_report::SectionSummary;

use super::{Paths, Workspace};

pub fn execute(paths: &Paths) -> Result<()> {
    let workspace = Workspace::load(paths)?;
    let session = workspace.open_session(Arc::new(NoopNotifier))?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Section", "Duration", "Questions", "Status", "Score"]);

    for section in session.sections() {
        let available = session.bank().questions(section.id).len();
        let score = SectionSummary::from(section).score_label();
        table.add_row(vec![
            Cell::new(section.id),
            Cell::new(&section.name),
            Cell::new(&section.duration),
            Cell::new(format!("{available}/{}", section.question_count)),
            Cell::new(section.status),
            Cell::new(score),
        ]);
    }

    println!("{table}");
    println!(
        "\nProfile: {} ({}% confidence)",
        session.profile().profile_type,
        session.profile().confidence_score
    );
    Ok(())
}
