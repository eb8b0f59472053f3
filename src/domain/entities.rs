//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/UI types here; adapters map into and out of these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse emotional category inferred from a comment's keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Struggling,
    Positive,
    Questioning,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Struggling,
        Sentiment::Positive,
        Sentiment::Questioning,
        Sentiment::Neutral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Struggling => "struggling",
            Sentiment::Positive => "positive",
            Sentiment::Questioning => "questioning",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stylistic register applied when generating a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Empathetic,
    Biblical,
    Inviting,
    Humble,
    Witty,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Empathetic,
        Tone::Biblical,
        Tone::Inviting,
        Tone::Humble,
        Tone::Witty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Empathetic => "empathetic",
            Tone::Biblical => "biblical",
            Tone::Inviting => "inviting",
            Tone::Humble => "humble",
            Tone::Witty => "witty",
        }
    }

    /// Parse a tone name. Trimmed and case-insensitive; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Tone> {
        let name = name.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(name))
    }

    /// Capitalized name for menus ("Empathetic").
    pub fn title(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static descriptive metadata for a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneProfile {
    pub description: &'static str,
    pub style: &'static str,
    pub focus: &'static str,
}

/// Sample exchange illustrating a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneExample {
    pub comment: &'static str,
    pub reply: &'static str,
}

/// Outcome of one reply generation. Built per call and returned immediately.
///
/// `sentiment_detected` and `tone_used` are kept on failure whenever they were
/// computed before the provider call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyResult {
    pub reply: Option<String>,
    pub tone_used: Option<Tone>,
    pub sentiment_detected: Option<Sentiment>,
    pub success: bool,
    pub error: Option<String>,
}

impl ReplyResult {
    pub fn replied(reply: String, sentiment: Sentiment, tone: Tone) -> Self {
        Self {
            reply: Some(reply),
            tone_used: Some(tone),
            sentiment_detected: Some(sentiment),
            success: true,
            error: None,
        }
    }

    pub fn failed(error: String, sentiment: Option<Sentiment>, tone: Option<Tone>) -> Self {
        Self {
            reply: None,
            tone_used: tone,
            sentiment_detected: sentiment,
            success: false,
            error: Some(error),
        }
    }

    /// Reply text on success, error description on failure.
    pub fn outcome(&self) -> Result<&str, &str> {
        match (self.success, self.reply.as_deref(), self.error.as_deref()) {
            (true, Some(reply), _) => Ok(reply),
            (_, _, Some(error)) => Err(error),
            _ => Err("no reply generated"),
        }
    }
}

/// Everything a provider needs for one completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub user_instruction: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_from_name_is_case_insensitive() {
        assert_eq!(Tone::from_name("Witty"), Some(Tone::Witty));
        assert_eq!(Tone::from_name("  HUMBLE "), Some(Tone::Humble));
        assert_eq!(Tone::from_name("sarcastic"), None);
        assert_eq!(Tone::from_name(""), None);
    }

    #[test]
    fn test_tone_title() {
        assert_eq!(Tone::Empathetic.title(), "Empathetic");
        assert_eq!(Tone::Witty.title(), "Witty");
    }

    #[test]
    fn test_reply_result_outcome() {
        let ok = ReplyResult::replied("Hi".into(), Sentiment::Neutral, Tone::Inviting);
        assert_eq!(ok.outcome(), Ok("Hi"));

        let err = ReplyResult::failed("boom".into(), Some(Sentiment::Neutral), None);
        assert_eq!(err.outcome(), Err("boom"));
        assert!(err.reply.is_none());
    }

    #[test]
    fn test_reply_result_serializes_lowercase_enums() {
        let result = ReplyResult::replied("Hi".into(), Sentiment::Positive, Tone::Humble);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["tone_used"], "humble");
        assert_eq!(json["sentiment_detected"], "positive");
        assert_eq!(json["success"], true);
    }
}
