//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.
//!
//! ```toml
//! [[sections]]
//! id = 2
//! name = "Cognitive Processing"
//!
//! [[sections.questions]]
//! id = 1
//! text = "When faced with a complex problem, I typically:"
//! dimension = "Working Memory"
//!
//! [[sections.questions.options]]
//! text = "Break it down into smaller, manageable parts"
//! weight = 100
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::QuestionBank;
use crate::model::{AnswerOption, Question, MAX_WEIGHT};

#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    sections: Vec<TomlSection>,
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    id: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: u32,
    text: String,
    dimension: String,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    text: String,
    weight: u32,
}

/// Questions for one section as read from a bank file.
#[derive(Debug, Clone, PartialEq)]
pub struct BankSection {
    pub id: u32,
    pub name: Option<String>,
    pub questions: Vec<Question>,
}

/// Parse a single TOML bank file.
pub fn parse_bank_file(path: &Path) -> Result<Vec<BankSection>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into bank sections.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<Vec<BankSection>> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    parsed
        .sections
        .into_iter()
        .map(|s| {
            let questions = s
                .questions
                .into_iter()
                .map(|q| {
                    let options = q
                        .options
                        .into_iter()
                        .map(|o| {
                            let weight = u8::try_from(o.weight).map_err(|_| {
                                anyhow::anyhow!(
                                    "section {} question {}: weight {} is out of range",
                                    s.id,
                                    q.id,
                                    o.weight
                                )
                            })?;
                            Ok(AnswerOption {
                                text: o.text,
                                weight,
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(Question {
                        id: q.id,
                        text: q.text,
                        dimension: q.dimension,
                        options,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(BankSection {
                id: s.id,
                name: s.name,
                questions,
            })
        })
        .collect()
}

/// Load bank sections from a file, or recursively from every `.toml` file
/// in a directory. Unparseable files inside a directory are skipped.
pub fn load_bank_sections(path: &Path) -> Result<Vec<BankSection>> {
    if !path.is_dir() {
        return parse_bank_file(path);
    }

    let mut entries: Vec<_> = std::fs::read_dir(path)
        .with_context(|| format!("failed to read directory: {}", path.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    let mut sections = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            sections.extend(load_bank_sections(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank_file(&path) {
                Ok(found) => sections.extend(found),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sections)
}

/// Load a question bank from a file or directory. Later sections replace
/// earlier ones with the same id.
pub fn load_question_bank(path: &Path) -> Result<QuestionBank> {
    let mut bank = QuestionBank::new();
    for section in load_bank_sections(path)? {
        bank.insert(section.id, section.questions);
    }
    Ok(bank)
}

/// A warning from question bank validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub section_id: u32,
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    pub message: String,
}

/// Validate bank sections for common issues.
pub fn validate_bank(sections: &[BankSection]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_sections = HashSet::new();
    for section in sections {
        if !seen_sections.insert(section.id) {
            warnings.push(ValidationWarning {
                section_id: section.id,
                question_id: None,
                message: format!("duplicate section ID: {}", section.id),
            });
        }
        if section.questions.is_empty() {
            warnings.push(ValidationWarning {
                section_id: section.id,
                question_id: None,
                message: "section has no questions and will always score 0".into(),
            });
        }

        let mut seen_questions = HashSet::new();
        for q in &section.questions {
            let warn = |message: String| ValidationWarning {
                section_id: section.id,
                question_id: Some(q.id),
                message,
            };

            if !seen_questions.insert(q.id) {
                warnings.push(warn(format!("duplicate question ID: {}", q.id)));
            }
            if q.text.trim().is_empty() {
                warnings.push(warn("question text is empty".into()));
            }
            if q.dimension.trim().is_empty() {
                warnings.push(warn("question has no dimension".into()));
            }
            if q.options.is_empty() {
                warnings.push(warn("question has no options".into()));
            }
            for o in q.options.iter().filter(|o| o.weight > MAX_WEIGHT) {
                warnings.push(warn(format!(
                    "option '{}' has weight {} above {MAX_WEIGHT}",
                    o.text, o.weight
                )));
            }
        }
    }

    warnings
}
