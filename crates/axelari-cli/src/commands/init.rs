//! The `axelari init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("axelari.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("question-banks")?;
    write_if_missing(Path::new("question-banks/example.toml"), EXAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Set AXELARI_GEMINI_KEY to use the study assistant");
    println!("  2. Run: axelari validate --question-bank question-banks/example.toml");
    println!("  3. Run: axelari take --section 1");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# axelari configuration

state_file = "axelari-state.json"
# question_bank = "question-banks"

[assistant]
api_key = "${AXELARI_GEMINI_KEY}"
model = "gemini-2.0-flash"
timeout_secs = 30
max_retries = 2

[metadata]
mode = "deterministic"
"#;

const EXAMPLE_BANK: &str = r#"# Questions are grouped by the section id they belong to.
# A section listed here replaces the built-in questions for that id.

[[sections]]
id = 3
name = "Focus & Attention Span"

[[sections.questions]]
id = 1
text = "When studying for an exam, I usually:"
dimension = "Sustained Attention"

[[sections.questions.options]]
text = "Work through the material in one long session"
weight = 100

[[sections.questions.options]]
text = "Study in blocks with planned breaks"
weight = 75

[[sections.questions.options]]
text = "Switch between subjects to stay fresh"
weight = 50

[[sections.questions.options]]
text = "Study in short bursts whenever I can"
weight = 25

[[sections.questions]]
id = 2
text = "Notifications arriving while I read:"
dimension = "Distraction Sensitivity"

[[sections.questions.options]]
text = "Go unnoticed"
weight = 100

[[sections.questions.options]]
text = "Get noticed but ignored"
weight = 75

[[sections.questions.options]]
text = "Pull me away for a moment"
weight = 50

[[sections.questions.options]]
text = "Break my concentration completely"
weight = 25
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use axelari_core::parser::{parse_bank_str, validate_bank};

    #[test]
    fn example_bank_is_valid() {
        let sections = parse_bank_str(EXAMPLE_BANK, Path::new("example.toml")).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].questions.len(), 2);
        assert!(validate_bank(&sections).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config: axelari_assistant::AxelariConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.assistant.model, "gemini-2.0-flash");
    }
}
