//! Provider abstraction for LLM chat-completion APIs.
//!
//! Gives the responder a single request/response shape regardless of which
//! endpoint serves the model.

mod openai;

pub use openai::OpenAIProvider;

use async_trait::async_trait;
use noodle_common::config::LlmConfig;
use noodle_common::Error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Provider Trait
// ============================================================================

/// Unified interface for LLM providers.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Get known models for this provider.
    fn models(&self) -> Vec<&str>;

    /// Check if this provider supports a given model.
    fn supports_model(&self, model: &str) -> bool;

    /// Send a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError>;
}

/// Error from a provider.
#[derive(Debug, Clone)]
pub struct ProviderError {
    pub provider: String,
    pub model: String,
    pub message: String,
    pub status_code: Option<u16>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.provider, self.model, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {code})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ProviderError {}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Unified chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<Message>,
    /// Temperature (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// System prompt (if not in messages)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// A user ("human") turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Unified chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Provider name
    pub provider: String,
    /// Model used
    pub model: String,
    /// Response content
    pub content: String,
    /// Token usage
    pub usage: TokenUsage,
    /// Finish reason
    pub finish_reason: Option<String>,
    /// Response latency in milliseconds
    pub latency_ms: u64,
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub total_tokens: i64,
}

// ============================================================================
// Construction from configuration
// ============================================================================

/// Build the configured provider.
///
/// Fails before any network traffic when the provider is unknown or the
/// API key is missing.
pub fn build_provider(config: &LlmConfig) -> noodle_common::Result<Arc<dyn Provider>> {
    let api_key = match config.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => key,
        _ => {
            return Err(Error::Config(format!(
                "no API key configured for provider '{}' (set OPENAI_API_KEY or llm.api_key)",
                config.provider
            )))
        }
    };

    match config.provider.as_str() {
        "openai" | "compatible" => Ok(Arc::new(OpenAIProvider::with_options(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        ))),
        other => Err(Error::Config(format!("unsupported LLM provider: {other}"))),
    }
}
