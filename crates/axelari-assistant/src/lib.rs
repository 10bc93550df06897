//! axelari-assistant: Chat assistant client and configuration.
//!
//! Implements the `AssistantProvider` trait for Google Gemini, plus a mock,
//! the chat conversation log and the `axelari.toml` configuration loader.

pub mod chat;
pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;

pub use chat::{ask, ChatMessage, Conversation, RetryPolicy, Role};
pub use config::{create_provider, load_config, load_config_from, AssistantConfig, AxelariConfig};
pub use error::AssistantError;
