//! Subcommand implementations and the state plumbing they share.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use axelari_assistant::{load_config_from, AxelariConfig};
use axelari_core::catalog::QuestionBank;
use axelari_core::notify::{Notification, Notifier};
use axelari_core::parser::load_question_bank;
use axelari_core::store::SessionSnapshot;
use axelari_core::AssessmentSession;

pub mod ask;
pub mod chat;
pub mod history;
pub mod init;
pub mod results;
pub mod sections;
pub mod take;
pub mod validate;

/// Paths given as global flags.
pub struct Paths {
    pub config: Option<PathBuf>,
    pub state: Option<PathBuf>,
}

/// Loaded configuration plus the resolved state file.
pub struct Workspace {
    pub config: AxelariConfig,
    pub state_path: PathBuf,
}

impl Workspace {
    pub fn load(paths: &Paths) -> Result<Self> {
        let config = load_config_from(paths.config.as_deref())?;
        let state_path = paths
            .state
            .clone()
            .unwrap_or_else(|| config.state_file.clone());
        Ok(Self { config, state_path })
    }

    /// Built-in questions, overlaid with the configured bank if any.
    pub fn question_bank(&self) -> Result<QuestionBank> {
        let mut bank = QuestionBank::builtin();
        if let Some(path) = &self.config.question_bank {
            let extra = load_question_bank(path)
                .with_context(|| format!("failed to load question bank {}", path.display()))?;
            bank.extend(extra);
        }
        Ok(bank)
    }

    /// Open the saved session, or a new one from the built-in seed.
    pub fn open_session(&self, notifier: Arc<dyn Notifier>) -> Result<AssessmentSession> {
        let bank = self.question_bank()?;
        let seed = SessionSnapshot::load_or_builtin(&self.state_path)?;
        let mode = self.config.metadata;
        let session = if self.state_path.exists() {
            AssessmentSession::restore(bank, seed, mode, notifier)
        } else {
            AssessmentSession::new(bank, seed, mode, notifier)
        };
        Ok(session)
    }

    pub fn save_session(&self, session: &AssessmentSession) -> Result<()> {
        SessionSnapshot::capture(session).save_json(&self.state_path)?;
        tracing::debug!(path = %self.state_path.display(), "saved session");
        Ok(())
    }
}

/// Prints notifications to stderr as toasts.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        let marker = if notification.is_destructive() { "!" } else { "*" };
        eprintln!(
            "{marker} {}: {}",
            notification.title(),
            notification.description()
        );
    }
}

/// Write `content` to `output`, or print it.
pub fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
