//! Gemini `generateContent` provider implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use axelari_core::traits::{
    blocked_reply, format_markdown_reply, AssistantProvider, AssistantRequest, AssistantResponse,
    ReplyKind, NO_RESPONSE_REPLY,
};

use crate::config::AssistantConfig;
use crate::error::AssistantError;

/// Google Gemini API provider.
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssistantError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiResponse {
    /// Turn the raw response into display text and its kind.
    fn into_reply(self) -> (String, ReplyKind) {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return (blocked_reply(&reason), ReplyKind::Blocked { reason });
        }

        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text);

        match text {
            Some(text) => (format_markdown_reply(&text), ReplyKind::Answered),
            None => (NO_RESPONSE_REPLY.to_string(), ReplyKind::Empty),
        }
    }
}

#[async_trait]
impl AssistantProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate(&self, request: &AssistantRequest) -> anyhow::Result<AssistantResponse> {
        let start = Instant::now();

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout(self.timeout_secs)
                } else {
                    AssistantError::NetworkError(e.without_url().to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(AssistantError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(AssistantError::ModelNotFound(request.model.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status, body = %body, "assistant API error");
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AssistantError::ApiError { status, message }.into());
        }

        let api_response: GeminiResponse =
            response.json().await.map_err(|e| AssistantError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let model = api_response
            .model_version
            .clone()
            .unwrap_or_else(|| request.model.clone());
        let (content, kind) = api_response.into_reply();
        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(latency_ms, ?kind, "assistant replied");

        Ok(AssistantResponse {
            content,
            kind,
            model,
            latency_ms,
        })
    }
}
