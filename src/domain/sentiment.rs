//! Keyword sentiment classifier.
//!
//! Plain substring containment on the lower-cased comment. Keyword sets are checked
//! in priority order: struggling, positive, questioning; anything else is neutral.

use crate::domain::Sentiment;

const STRUGGLING_KEYWORDS: &[&str] = &[
    "struggle",
    "struggling",
    "hard",
    "difficult",
    "doubt",
    "doubting",
    "lost",
    "confused",
    "hurt",
    "pain",
    "afraid",
    "scared",
    "worried",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "thank",
    "grateful",
    "amazing",
    "blessed",
    "love",
    "wonderful",
    "beautiful",
    "inspiring",
    "helped",
    "encouraging",
];

const QUESTIONING_KEYWORDS: &[&str] = &[
    "why",
    "how",
    "what",
    "when",
    "where",
    "understand",
    "explain",
    "confused",
    "unclear",
    "question",
];

/// Priority order matters: a comment matching several sets takes the first.
const RULES: &[(Sentiment, &[&str])] = &[
    (Sentiment::Struggling, STRUGGLING_KEYWORDS),
    (Sentiment::Positive, POSITIVE_KEYWORDS),
    (Sentiment::Questioning, QUESTIONING_KEYWORDS),
];

/// Classify a comment. Total and deterministic.
pub fn classify(comment: &str) -> Sentiment {
    let lower = comment.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(sentiment, _)| *sentiment)
        .unwrap_or(Sentiment::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struggling() {
        assert_eq!(
            classify("I'm struggling to believe this applies to me."),
            Sentiment::Struggling
        );
        assert_eq!(classify("I feel so LOST lately"), Sentiment::Struggling);
    }

    #[test]
    fn test_positive() {
        assert_eq!(classify("Thank you so much for this!"), Sentiment::Positive);
        assert_eq!(classify("Such a blessed morning"), Sentiment::Positive);
    }

    #[test]
    fn test_questioning() {
        assert_eq!(
            classify("Why does this keep happening to me?"),
            Sentiment::Questioning
        );
        assert_eq!(classify("Can you explain verse 3?"), Sentiment::Questioning);
    }

    #[test]
    fn test_neutral() {
        assert_eq!(classify("Nice post."), Sentiment::Neutral);
        assert_eq!(classify(""), Sentiment::Neutral);
    }

    #[test]
    fn test_struggling_wins_over_positive_and_questioning() {
        assert_eq!(
            classify("Thank you, but why is forgiveness so hard?"),
            Sentiment::Struggling
        );
        assert_eq!(classify("I love this but I'm worried"), Sentiment::Struggling);
    }

    #[test]
    fn test_positive_wins_over_questioning() {
        assert_eq!(
            classify("How wonderful is this, thank you"),
            Sentiment::Positive
        );
    }

    #[test]
    fn test_every_struggling_keyword_dominates() {
        for keyword in STRUGGLING_KEYWORDS {
            let comment = format!("thank you, {keyword}, why?");
            assert_eq!(classify(&comment), Sentiment::Struggling, "{comment}");
        }
    }

    #[test]
    fn test_substring_matching_has_no_word_boundaries() {
        // "however" contains "how"; "painting" contains "pain".
        assert_eq!(classify("however you like"), Sentiment::Questioning);
        assert_eq!(classify("painting the fence"), Sentiment::Struggling);
    }
}
