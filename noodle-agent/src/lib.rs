//! Noodle Agent - classifies a single customer review and drafts a reply.
//!
//! This crate provides:
//! - An LLM [`Provider`] abstraction with an OpenAI chat-completions implementation
//! - A forgiving parser for the model's `{sentiment, reply}` output
//! - [`FeedbackResponder`], which ties the two together for one review

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod parser;
pub mod prompt;
pub mod provider;
pub mod responder;

pub use parser::{parse_reply, ParseOutcome, ParsedReply};
pub use provider::{
    build_provider, ChatRequest, ChatResponse, Message, OpenAIProvider, Provider, ProviderError,
    TokenUsage,
};
pub use responder::FeedbackResponder;
