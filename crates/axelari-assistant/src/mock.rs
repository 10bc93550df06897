//! Scripted provider used in tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use axelari_core::traits::{
    format_markdown_reply, AssistantProvider, AssistantRequest, AssistantResponse, ReplyKind,
};

use crate::error::AssistantError;

/// Answers from keyword-matched canned replies, optionally after a number of
/// simulated network failures.
pub struct MockProvider {
    /// `(keyword, reply)` pairs checked in order.
    canned: Vec<(String, String)>,
    /// Used when no keyword matches.
    fallback: String,
    /// Calls that fail with a network error before replies start.
    failures_left: AtomicU32,
    calls: AtomicU32,
    last: Mutex<Option<AssistantRequest>>,
}

impl MockProvider {
    /// Reply with the first entry whose keyword occurs in the prompt.
    pub fn new(replies: HashMap<String, String>) -> Self {
        let mut canned: Vec<_> = replies.into_iter().collect();
        canned.sort();
        Self {
            canned,
            fallback: "Keep practicing a little every day.".to_string(),
            failures_left: AtomicU32::new(0),
            calls: AtomicU32::new(0),
            last: Mutex::new(None),
        }
    }

    /// Always give the same reply.
    pub fn with_fixed_response(reply: &str) -> Self {
        Self {
            fallback: reply.into(),
            ..Self::new(HashMap::new())
        }
    }

    /// Create a mock whose first `n` calls fail with a network error.
    pub fn failing(n: u32) -> Self {
        let mock = Self::new(HashMap::new());
        mock.failures_left.store(n, Ordering::Relaxed);
        mock
    }

    /// Number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    /// The last request made to this provider.
    pub fn last_request(&self) -> Option<AssistantRequest> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl AssistantProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &AssistantRequest) -> anyhow::Result<AssistantResponse> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(request.clone());
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AssistantError::NetworkError("connection refused".into()).into());
        }

        let content = self
            .canned
            .iter()
            .find_map(|(keyword, reply)| request.prompt.contains(keyword.as_str()).then_some(reply))
            .unwrap_or(&self.fallback);

        Ok(AssistantResponse {
            content: format_markdown_reply(content),
            kind: ReplyKind::Answered,
            model: request.model.clone(),
            latency_ms: 1,
        })
    }
}
