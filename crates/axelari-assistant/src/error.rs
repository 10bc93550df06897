//! Assistant error types.

use thiserror::Error;

/// Errors that can occur when talking to the assistant backend.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No API key was configured.
    #[error("no API key configured (set assistant.api_key or AXELARI_GEMINI_KEY)")]
    MissingApiKey,

    /// HTTP 429; `retry_after_ms` comes from the Retry-After header.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// The key was rejected (HTTP 401 or 403).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Connection-level failure before any HTTP status.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl AssistantError {
    /// Returns `true` if retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AssistantError::RateLimited { .. }
            | AssistantError::Timeout(_)
            | AssistantError::NetworkError(_) => true,
            AssistantError::ApiError { status, .. } => *status >= 500,
            AssistantError::MissingApiKey
            | AssistantError::AuthenticationFailed(_)
            | AssistantError::ModelNotFound(_) => false,
        }
    }

    /// Suggested wait before retrying, if the server sent one.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            AssistantError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}
