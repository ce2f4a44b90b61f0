//! Integration tests for the OpenAI provider and the responder.
//!
//! Runs against a local mock of the chat-completions endpoint.

use std::sync::Arc;
use std::time::Duration;

use noodle_agent::{FeedbackResponder, OpenAIProvider, Provider};
use noodle_common::Sentiment;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini-2024-07-18",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150 }
    })
}

fn provider_for(server: &MockServer) -> Arc<dyn Provider> {
    Arc::new(OpenAIProvider::with_options(
        "sk-test",
        server.uri(),
        Duration::from_secs(5),
    ))
}

#[tokio::test]
async fn classifies_review_through_chat_completions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"sentiment":"negative","reply":"We're sorry your noodles arrived cold."}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let responder = FeedbackResponder::new(provider_for(&server), "gpt-4o-mini");
    let result = responder
        .respond("Noodles were cold and the wait was 40 minutes.")
        .await
        .unwrap();

    assert_eq!(result.sentiment, Sentiment::Negative);
    assert_eq!(result.reply, "We're sorry your noodles arrived cold.");
}

#[tokio::test]
async fn system_turn_is_sent_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(r#"{"sentiment":"positive","reply":"Thanks!"}"#)),
        )
        .mount(&server)
        .await;

    let responder = FeedbackResponder::new(provider_for(&server), "gpt-4o-mini");
    responder.respond("Amazing broth").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert!(messages[1]["content"]
        .as_str()
        .unwrap()
        .contains("Amazing broth"));
}

#[tokio::test]
async fn malformed_completion_still_yields_valid_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "Here you go:\n{\"sentiment\": \"Positive\", \"reply\": \"Thank you!\"}\nLet me know!",
        )))
        .mount(&server)
        .await;

    let responder = FeedbackResponder::new(provider_for(&server), "gpt-4o-mini");
    let result = responder.respond("Loved it").await.unwrap();

    assert_eq!(result.sentiment, Sentiment::Positive);
    assert!(!result.reply.is_empty());
}

#[tokio::test]
async fn http_error_is_surfaced_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let responder = FeedbackResponder::new(provider_for(&server), "gpt-4o-mini");
    let err = responder.respond("Loved it").await.unwrap_err();

    assert_eq!(err.status_code, Some(401));
    assert_eq!(err.provider, "openai");
    assert!(err.message.contains("invalid api key"));
}
