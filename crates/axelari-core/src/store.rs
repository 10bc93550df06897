//! JSON persistence of session state between runs.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::SeedData;
use crate::session::AssessmentSession;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Saved sections, profile, dimensions and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: SeedData,
}

impl SessionSnapshot {
    /// Capture the current state of a session. Any running attempt is not
    /// included.
    pub fn capture(session: &AssessmentSession) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            state: session.to_seed(),
        }
    }

    /// Save the snapshot as pretty JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "saved session snapshot");
        Ok(())
    }

    /// Load a snapshot from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session from {}", path.display()))?;
        let snapshot: SessionSnapshot =
            serde_json::from_str(&content).context("failed to parse session JSON")?;
        if snapshot.version > SNAPSHOT_VERSION {
            anyhow::bail!(
                "session file {} has version {}, newer than supported {}",
                path.display(),
                snapshot.version,
                SNAPSHOT_VERSION
            );
        }
        Ok(snapshot)
    }

    /// Load the state at `path`, or the built-in seed if the file does not
    /// exist yet.
    pub fn load_or_builtin(path: &Path) -> Result<SeedData> {
        if path.exists() {
            Ok(Self::load_json(path)?.state)
        } else {
            tracing::debug!(path = %path.display(), "no session file, using built-in seed");
            Ok(SeedData::builtin())
        }
    }
}
