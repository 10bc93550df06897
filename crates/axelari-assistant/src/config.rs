//! Configuration loading and provider factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use axelari_core::metadata::MetadataMode;
use axelari_core::traits::AssistantProvider;

use crate::error::AssistantError;
use crate::gemini::GeminiProvider;

/// Environment variable that overrides `assistant.api_key`.
pub const API_KEY_ENV: &str = "AXELARI_GEMINI_KEY";

/// Settings for the remote assistant.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Retries on transient errors (timeouts, 429, 5xx).
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { "***" };
        f.debug_struct("AssistantConfig")
            .field("api_key", &key)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_retries() -> u32 {
    2
}
fn default_retry_delay() -> u64 {
    1000
}
fn default_state_file() -> PathBuf {
    PathBuf::from("./axelari-state.json")
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

/// Top-level axelari configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxelariConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// How percentiles, intervals and path scores are generated.
    #[serde(default)]
    pub metadata: MetadataMode,
    /// Where session state is saved between runs.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    /// Optional TOML question bank file or directory merged over the
    /// built-in bank.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
}

impl Default for AxelariConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig::default(),
            metadata: MetadataMode::default(),
            state_file: default_state_file(),
            question_bank: None,
        }
    }
}

static ENV_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("invalid regex"));

/// Substitute `${NAME}` with the value of that environment variable, or
/// nothing when it is unset.
fn resolve_env_vars(s: &str) -> String {
    ENV_REF
        .replace_all(s, |caps: &Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `axelari.toml` in the current directory
/// 2. `~/.config/axelari/config.toml`
///
/// `AXELARI_GEMINI_KEY` overrides the configured API key.
pub fn load_config() -> Result<AxelariConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AxelariConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("axelari.toml");
            if local.exists() {
                Some(local)
            } else {
                config_dir()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<AxelariConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => AxelariConfig::default(),
    };

    if let Ok(key) = std::env::var(API_KEY_ENV) {
        config.assistant.api_key = key;
    }

    config.assistant.api_key = resolve_env_vars(&config.assistant.api_key);
    config.assistant.base_url = resolve_env_vars(&config.assistant.base_url);

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("axelari"))
}

/// Create the assistant provider described by the configuration.
pub fn create_provider(config: &AssistantConfig) -> Result<Box<dyn AssistantProvider>> {
    if config.api_key.trim().is_empty() {
        return Err(AssistantError::MissingApiKey.into());
    }
    Ok(Box::new(GeminiProvider::new(config)?))
}
