//! Forgiving parser for the model's `{sentiment, reply}` output.
//!
//! Model output is untrusted text. [`parse_reply`] is total: every input
//! yields a well-formed [`ClassificationResult`], and the [`ParseOutcome`]
//! records how much of it actually came from the model.

use noodle_common::{ClassificationResult, Sentiment};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static SENTIMENT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"sentiment"\s*:\s*"(?P<s>[^"]+)""#).unwrap());

// Lazy body up to the last quote that is followed only by an optional
// closing brace and trailing whitespace.
static REPLY_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)"reply"\s*:\s*"(?P<r>.*?)"\s*\}?\s*$"#).unwrap());

/// How a reply was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The text was a JSON object.
    Strict,
    /// Not valid JSON, but at least one field was pattern-matched.
    Salvaged,
    /// Nothing usable; neutral with the fallback reply.
    Fallback,
}

/// Parsed classification plus how it was recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub result: ClassificationResult,
    pub outcome: ParseOutcome,
}

impl ParsedReply {
    /// Whether the result fell back to defaults for any reason other than strict decoding.
    pub fn is_degraded(&self) -> bool {
        self.outcome != ParseOutcome::Strict
    }
}

/// Parse raw model text into a sentiment/reply pair.
pub fn parse_reply(raw: &str) -> ParsedReply {
    if let Some(result) = parse_strict(raw) {
        return ParsedReply {
            result,
            outcome: ParseOutcome::Strict,
        };
    }
    salvage(raw)
}

fn parse_strict(raw: &str) -> Option<ClassificationResult> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;

    let sentiment = object
        .get("sentiment")
        .and_then(field_text)
        .map_or(Sentiment::Neutral, |s| Sentiment::normalize(&s));
    let reply = object.get("reply").and_then(field_text).unwrap_or_default();

    Some(ClassificationResult::new(sentiment, reply))
}

/// Stringify a JSON field; `null` counts as absent.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn salvage(raw: &str) -> ParsedReply {
    let sentiment = SENTIMENT_FIELD
        .captures(raw)
        .and_then(|c| c.name("s"))
        .map(|m| m.as_str());
    let reply = REPLY_FIELD
        .captures(raw)
        .and_then(|c| c.name("r"))
        .map(|m| unescape(m.as_str()));

    let outcome = if sentiment.is_some() || reply.is_some() {
        ParseOutcome::Salvaged
    } else {
        ParseOutcome::Fallback
    };

    ParsedReply {
        result: ClassificationResult::new(
            sentiment.map_or(Sentiment::Neutral, Sentiment::normalize),
            reply.unwrap_or_default(),
        ),
        outcome,
    }
}

/// Decode JSON string escapes in a salvaged body, keeping the text as-is if
/// it is not a valid JSON string body.
fn unescape(body: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{body}\"")).unwrap_or_else(|_| body.to_string())
}
