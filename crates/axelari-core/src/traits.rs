//! Assistant provider trait and reply formatting.
//!
//! The trait is implemented by the `axelari-assistant` crate. Keeping it here
//! lets the CLI and tests swap the remote client for a mock.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Assistant provider trait
// ---------------------------------------------------------------------------

/// A text-generation backend for the chat assistant.
#[async_trait]
pub trait AssistantProvider: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate a reply for a single prompt.
    async fn generate(&self, request: &AssistantRequest) -> anyhow::Result<AssistantResponse>;
}

/// A single-turn prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantRequest {
    /// Model identifier (e.g. "gemini-2.0-flash").
    pub model: String,
    pub prompt: String,
}

/// How a reply was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyKind {
    /// The model produced text.
    Answered,
    /// The prompt was refused by the safety filter.
    Blocked { reason: String },
    /// The call succeeded but returned no candidates.
    Empty,
}

/// Reply from a provider, already formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub content: String,
    pub kind: ReplyKind,
    /// Model that answered.
    pub model: String,
    pub latency_ms: u64,
}

// ---------------------------------------------------------------------------
// Fixed reply texts
// ---------------------------------------------------------------------------

/// First message of every conversation.
pub const GREETING: &str = "Hi there! I'm your Axelari AI assistant powered by Gemini. I'm here to help with your learning journey. What would you like to explore today?";

/// Reply shown when the provider could not be reached.
pub const CONNECTION_ERROR_REPLY: &str =
    "Sorry, there was an error connecting to the AI service. Please try again later.";

/// Reply for a successful call without any candidate.
pub const NO_RESPONSE_REPLY: &str = "No response was generated.";

/// Reply for a prompt rejected by the safety filter.
pub fn blocked_reply(reason: &str) -> String {
    format!("I'm unable to respond to that query due to content safety guidelines ({reason}).")
}

// ---------------------------------------------------------------------------
// Markdown normalization
// ---------------------------------------------------------------------------

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("invalid regex"));
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\*\s").expect("invalid regex"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("invalid regex"));

/// Tidy a model reply for terminal display.
///
/// - every `**bold**` span is followed by a line break
/// - bullet lines are normalized to `* `
/// - runs of three or more newlines collapse to one blank line
pub fn format_markdown_reply(text: &str) -> String {
    let formatted = BOLD.replace_all(text, "**$1**\n");
    let formatted = BULLET.replace_all(&formatted, "\n* ");
    BLANK_RUN.replace_all(&formatted, "\n\n").into_owned()
}
