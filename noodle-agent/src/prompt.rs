//! Prompt text for review classification.

/// System turn: role, label set, reply tone.
pub const SYSTEM_PROMPT: &str = "You are SteamNoodles' customer care assistant. \
Given a single restaurant review, do two things:\n\
1) Decide sentiment as one of: positive, negative, neutral.\n\
2) Produce a short, warm, professional reply that acknowledges specifics and sets the right tone.\n\
Keep replies ~1-2 sentences. Don't fabricate details.";

/// Human turn wrapping the review text.
pub fn review_message(review: &str) -> String {
    format!(
        "Review:\n\n{review}\n\n\
         Respond ONLY as compact JSON with keys 'sentiment' and 'reply'. \
         Example: {{\"sentiment\":\"positive\",\"reply\":\"Thank you ...\"}}"
    )
}
