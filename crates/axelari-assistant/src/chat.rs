//! Chat conversation with the assistant.
//!
//! A conversation opens with a fixed greeting. Each prompt appends the user
//! message and then exactly one assistant reply. Provider failures never
//! surface as errors here: the reply becomes a fixed apology and an error
//! notification is raised.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use axelari_core::notify::{Notification, Notifier};
use axelari_core::traits::{
    AssistantProvider, AssistantRequest, AssistantResponse, CONNECTION_ERROR_REPLY, GREETING,
};

use crate::config::AssistantConfig;
use crate::error::AssistantError;

/// Upper bound for the exponential retry delay.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Retry policy for transient provider errors.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }
}

impl From<&AssistantConfig> for RetryPolicy {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// Send one prompt, retrying transient failures with exponential backoff.
pub async fn ask(
    provider: &dyn AssistantProvider,
    request: &AssistantRequest,
    policy: &RetryPolicy,
) -> anyhow::Result<AssistantResponse> {
    let mut last_error = None;
    let mut retry_delay = policy.delay;

    for retry in 0..=policy.max_retries {
        if retry > 0 {
            tokio::time::sleep(retry_delay).await;
            retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
        }

        match provider.generate(request).await {
            Ok(response) => return Ok(response),
            Err(e) => {
                let typed = e.downcast_ref::<AssistantError>();
                if typed.is_some_and(|err| !err.is_transient()) {
                    return Err(e);
                }
                if let Some(ms) = typed.and_then(AssistantError::retry_after_ms) {
                    retry_delay = Duration::from_millis(ms);
                }
                tracing::debug!(retry, "assistant call failed: {e:#}");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown error")))
}

/// Ordered message log of one chat session.
#[derive(Debug, Clone)]
pub struct Conversation {
    model: String,
    policy: RetryPolicy,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a conversation with the greeting message.
    pub fn new(model: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            model: model.into(),
            policy,
            messages: vec![ChatMessage::new(Role::Assistant, GREETING)],
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.model.clone(), RetryPolicy::from(config))
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_reply(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }

    /// Send a prompt and append the reply.
    ///
    /// Blank prompts are ignored and return `None`.
    pub async fn send(
        &mut self,
        provider: &dyn AssistantProvider,
        notifier: &dyn Notifier,
        prompt: &str,
    ) -> Option<&ChatMessage> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::new(Role::User, prompt));

        let request = AssistantRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
        };
        let reply = match ask(provider, &request, &self.policy).await {
            Ok(response) => response.content,
            Err(e) => {
                tracing::error!(provider = provider.name(), "assistant request failed: {e:#}");
                notifier.notify(&Notification::Error {
                    message: "Failed to get AI response. Please try again.".into(),
                });
                CONNECTION_ERROR_REPLY.to_string()
            }
        };

        self.messages.push(ChatMessage::new(Role::Assistant, reply));
        self.messages.last()
    }
}
