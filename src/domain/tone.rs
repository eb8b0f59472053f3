//! Tone catalogue and tone resolution.
//!
//! `witty` is never chosen by the sentiment mapping; it is only reachable through an
//! explicit override.

use crate::domain::{Sentiment, Tone, ToneExample, ToneProfile};
use tracing::debug;

/// Tone used when an override names no known tone.
pub const FALLBACK_TONE: Tone = Tone::Inviting;

impl Tone {
    /// Default tone for a sentiment.
    pub fn for_sentiment(sentiment: Sentiment) -> Tone {
        match sentiment {
            Sentiment::Struggling => Tone::Empathetic,
            Sentiment::Positive => Tone::Humble,
            Sentiment::Questioning => Tone::Biblical,
            Sentiment::Neutral => Tone::Inviting,
        }
    }

    pub fn profile(self) -> ToneProfile {
        match self {
            Tone::Empathetic => ToneProfile {
                description: "Compassionate and acknowledges the emotion behind the comment",
                style: "gentle, understanding, validating feelings",
                focus: "emotional support and spiritual comfort",
            },
            Tone::Biblical => ToneProfile {
                description: "Rooted in spiritual truth without being overly formal",
                style: "wise, grounded in faith, thoughtful",
                focus: "spiritual guidance and biblical wisdom",
            },
            Tone::Inviting => ToneProfile {
                description: "Leaves space for dialogue and reflection",
                style: "open-ended, encouraging conversation",
                focus: "fostering connection and continued dialogue",
            },
            Tone::Humble => ToneProfile {
                description: "Points back to God and comes from a place of grace",
                style: "modest, grateful, God-centered",
                focus: "deflecting praise to God and expressing gratitude",
            },
            Tone::Witty => ToneProfile {
                description: "Light, faith-filled humor when appropriate",
                style: "gentle humor, joy-filled, lighthearted",
                focus: "bringing joy while maintaining spiritual depth",
            },
        }
    }

    pub fn example(self) -> ToneExample {
        match self {
            Tone::Empathetic => ToneExample {
                comment: "I'm struggling to believe this applies to me.",
                reply: "I hear the struggle in your words, and that's so understandable. \
                        Sometimes the most profound truths feel the hardest to accept for \
                        ourselves. You're not alone in feeling this way. ❤️",
            },
            Tone::Biblical => ToneExample {
                comment: "I don't understand why this keeps happening to me.",
                reply: "Those 'why' questions can feel so heavy, can't they? Sometimes our \
                        greatest growth comes through seasons we never would have chosen. \
                        His plans often unfold in ways we can't see in the moment.",
            },
            Tone::Inviting => ToneExample {
                comment: "This really made me think.",
                reply: "I love when something sparks that kind of reflection! What part \
                        resonated most with you? I'd be curious to hear what thoughts it \
                        stirred up.",
            },
            Tone::Humble => ToneExample {
                comment: "Thank you so much for sharing this wisdom!",
                reply: "You're so kind! Any wisdom here isn't mine - I'm just grateful when \
                        something resonates and encourages someone's heart. That's all \
                        God's grace at work. 🙏",
            },
            Tone::Witty => ToneExample {
                comment: "I needed to hear this today!",
                reply: "Isn't it amazing how the right words show up exactly when we need \
                        them? Someone upstairs has pretty good timing! 😊 Hope it brings \
                        some light to your day.",
            },
        }
    }

    /// Parse a tone name, substituting `inviting` for unknown names.
    pub fn from_name_or_fallback(name: &str) -> Tone {
        Tone::from_name(name).unwrap_or_else(|| {
            debug!(tone = name, fallback = %FALLBACK_TONE, "unknown tone, using fallback");
            FALLBACK_TONE
        })
    }
}

/// Pick the reply tone.
///
/// - no override (or blank): sentiment mapping
/// - known tone name (case-insensitive): that tone
/// - anything else: `inviting`
pub fn resolve_tone(sentiment: Sentiment, tone_override: Option<&str>) -> Tone {
    match tone_override.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => Tone::from_name_or_fallback(name),
        None => Tone::for_sentiment(sentiment),
    }
}
