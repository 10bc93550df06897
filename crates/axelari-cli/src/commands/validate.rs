//! The `axelari validate` command.

use std::path::PathBuf;

use anyhow::Result;

use axelari_core::parser::{load_bank_sections, validate_bank};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let sections = load_bank_sections(&bank_path)?;
    if sections.is_empty() {
        anyhow::bail!("no sections found in {}", bank_path.display());
    }

    for section in &sections {
        let name = section.name.as_deref().unwrap_or("unnamed");
        println!(
            "Section {}: {} ({} questions)",
            section.id,
            name,
            section.questions.len()
        );
    }

    let warnings = validate_bank(&sections);
    for w in &warnings {
        let prefix = match w.question_id {
            Some(id) => format!("  [{}/{id}]", w.section_id),
            None => format!("  [{}]", w.section_id),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All question banks valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
