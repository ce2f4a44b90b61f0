//! Feedback classification service.
//!
//! One review in, one [`ClassificationResult`] out, via a single chat
//! completion. Transport errors propagate; malformed output never does.

use noodle_common::{ClassificationResult, Sentiment};
use std::sync::Arc;

use crate::parser::{parse_reply, ParseOutcome};
use crate::prompt::{review_message, SYSTEM_PROMPT};
use crate::provider::{ChatRequest, Message, Provider, ProviderError};

/// Classifies reviews and drafts replies with an LLM provider.
pub struct FeedbackResponder {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f64,
}

impl FeedbackResponder {
    /// Sampling temperature used unless overridden.
    pub const DEFAULT_TEMPERATURE: f64 = 0.2;

    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the two-turn request for a review.
    pub fn build_request(&self, review: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::user(review_message(review))],
            temperature: Some(self.temperature),
            system: Some(SYSTEM_PROMPT.to_string()),
        }
    }

    /// Classify one review and draft a reply.
    pub async fn respond(&self, review: &str) -> Result<ClassificationResult, ProviderError> {
        if !self.provider.supports_model(&self.model) {
            tracing::warn!(
                provider = %self.provider.name(),
                model = %self.model,
                "Model is not in the provider's known list, sending anyway"
            );
        }

        let response = self.provider.chat(self.build_request(review)).await?;

        tracing::info!(
            provider = %response.provider,
            model = %response.model,
            latency_ms = response.latency_ms,
            total_tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "Chat completion received"
        );

        let parsed = parse_reply(&response.content);
        if parsed.outcome != ParseOutcome::Strict {
            tracing::debug!(
                outcome = ?parsed.outcome,
                raw_len = response.content.len(),
                "Model output was not strict JSON"
            );
        }

        let mut result = parsed.result;
        result.sentiment = Sentiment::normalize(result.sentiment.as_str());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ChatResponse, TokenUsage};
    use async_trait::async_trait;
    use noodle_common::FALLBACK_REPLY;
    use std::sync::Mutex;

    /// Provider that replays a canned completion and records the request.
    struct ScriptedProvider {
        reply: Result<String, ProviderError>,
        seen: Mutex<Option<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn ok(content: &str) -> Self {
            Self {
                reply: Ok(content.to_string()),
                seen: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(ProviderError {
                    provider: "scripted".into(),
                    model: "gpt-4o-mini".into(),
                    message: "Request failed: connection refused".into(),
                    status_code: None,
                }),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn models(&self) -> Vec<&str> {
            vec!["gpt-4o-mini"]
        }

        fn supports_model(&self, model: &str) -> bool {
            model == "gpt-4o-mini"
        }

        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
            let model = request.model.clone();
            *self.seen.lock().unwrap() = Some(request);
            self.reply.clone().map(|content| ChatResponse {
                provider: "scripted".into(),
                model,
                content,
                usage: TokenUsage::default(),
                finish_reason: Some("stop".into()),
                latency_ms: 1,
            })
        }
    }

    #[test]
    fn request_has_system_and_human_turns() {
        let responder = FeedbackResponder::new(Arc::new(ScriptedProvider::ok("")), "gpt-4o-mini");
        let request = responder.build_request("Great dumplings");
        assert_eq!(request.system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert!(request.messages[0].content.contains("Great dumplings"));
        assert_eq!(request.temperature, Some(0.2));
    }

    #[tokio::test]
    async fn respond_returns_parsed_result() {
        let provider = Arc::new(ScriptedProvider::ok(
            r#"{"sentiment":"positive","reply":"Thanks, come back soon!"}"#,
        ));
        let responder = FeedbackResponder::new(provider.clone(), "gpt-4o-mini");

        let result = responder.respond("Loved it").await.unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.reply, "Thanks, come back soon!");

        let seen = provider.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn respond_recovers_from_malformed_output() {
        let provider = Arc::new(ScriptedProvider::ok("I think it's mixed, honestly."));
        let responder = FeedbackResponder::new(provider, "gpt-4o-mini");

        let result = responder.respond("Okay food, slow service").await.unwrap();
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn respond_propagates_transport_errors() {
        let responder =
            FeedbackResponder::new(Arc::new(ScriptedProvider::failing()), "gpt-4o-mini");
        let err = responder.respond("anything").await.unwrap_err();
        assert!(err.message.contains("connection refused"));
    }

    #[tokio::test]
    async fn respond_uses_custom_temperature() {
        let provider = Arc::new(ScriptedProvider::ok(r#"{"sentiment":"neutral","reply":"Ok"}"#));
        let responder =
            FeedbackResponder::new(provider.clone(), "gpt-4o").with_temperature(0.0);
        responder.respond("fine").await.unwrap();

        let seen = provider.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.temperature, Some(0.0));
        assert_eq!(seen.model, "gpt-4o");
    }
}
