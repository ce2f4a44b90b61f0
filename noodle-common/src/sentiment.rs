//! Sentiment labels and classification results.
//!
//! Every place that turns free text into a label (model output, dataset
//! rows, CLI input) goes through [`Sentiment::normalize`], so the
//! "unknown means neutral" rule is defined exactly once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reply used whenever no usable reply can be extracted from the model.
pub const FALLBACK_REPLY: &str =
    "Thank you for your feedback. We appreciate your time and will use your input to improve.";

/// Canonical sentiment label.
///
/// Variant order matches the lexical order of the labels, which is also the
/// column order of the daily trend table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Sentiment {
    /// All labels in column order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Lower-case label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
        }
    }

    /// Coerce any raw label to a canonical one.
    ///
    /// Trims and lower-cases the input; anything outside the three labels
    /// (including "mixed" or an empty string) becomes [`Sentiment::Neutral`].
    pub fn normalize(raw: &str) -> Self {
        raw.parse().unwrap_or(Sentiment::Neutral)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the strict [`FromStr`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment label: {0}")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            "positive" => Ok(Sentiment::Positive),
            other => Err(UnknownSentiment(other.to_string())),
        }
    }
}

/// Sentiment label plus the drafted customer reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub sentiment: Sentiment,
    pub reply: String,
}

impl ClassificationResult {
    /// Build a result, substituting [`FALLBACK_REPLY`] for a blank reply.
    pub fn new(sentiment: Sentiment, reply: impl Into<String>) -> Self {
        let reply = reply.into();
        let trimmed = reply.trim();
        let reply = if trimmed.is_empty() {
            FALLBACK_REPLY.to_string()
        } else {
            trimmed.to_string()
        };
        Self { sentiment, reply }
    }

    /// The safe default: neutral with the fallback reply.
    pub fn fallback() -> Self {
        Self::new(Sentiment::Neutral, FALLBACK_REPLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_known_labels() {
        assert_eq!(Sentiment::normalize("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::normalize("  NEGATIVE "), Sentiment::Negative);
        assert_eq!(Sentiment::normalize("Neutral"), Sentiment::Neutral);
    }

    #[test]
    fn normalize_coerces_unknown_to_neutral() {
        assert_eq!(Sentiment::normalize("mixed"), Sentiment::Neutral);
        assert_eq!(Sentiment::normalize(""), Sentiment::Neutral);
        assert_eq!(Sentiment::normalize("very positive"), Sentiment::Neutral);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert!("mixed".parse::<Sentiment>().is_err());
        assert_eq!("positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
    }

    #[test]
    fn labels_sort_lexically() {
        let mut labels = vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];
        labels.sort();
        assert_eq!(labels, Sentiment::ALL.to_vec());
    }

    #[test]
    fn result_substitutes_fallback_for_blank_reply() {
        let r = ClassificationResult::new(Sentiment::Positive, "   ");
        assert_eq!(r.reply, FALLBACK_REPLY);
        let r = ClassificationResult::new(Sentiment::Positive, "  Thanks!  ");
        assert_eq!(r.reply, "Thanks!");
    }

    #[test]
    fn result_serializes_lowercase_label() {
        let r = ClassificationResult::new(Sentiment::Negative, "Sorry to hear that.");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"sentiment":"negative","reply":"Sorry to hear that."}"#);
    }
}
