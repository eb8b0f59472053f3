//! Running session counters shown in the chat UI. Display only.

use crate::domain::{ReplyResult, Sentiment, Tone};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionStats {
    pub total_messages: usize,
    pub successful_replies: usize,
    pub tone_usage: BTreeMap<Tone, usize>,
    pub sentiment_distribution: BTreeMap<Sentiment, usize>,
}

impl SessionStats {
    /// Count one result. Tone and sentiment are only tallied for successful replies.
    pub fn record(&mut self, result: &ReplyResult) {
        self.total_messages += 1;
        if !result.success {
            return;
        }
        self.successful_replies += 1;
        if let Some(tone) = result.tone_used {
            *self.tone_usage.entry(tone).or_default() += 1;
        }
        if let Some(sentiment) = result.sentiment_detected {
            *self.sentiment_distribution.entry(sentiment).or_default() += 1;
        }
    }

    /// Percentage of successful replies; 0.0 before any message.
    pub fn success_rate(&self) -> f64 {
        if self.total_messages == 0 {
            return 0.0;
        }
        self.successful_replies as f64 / self.total_messages as f64 * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total messages: {}", self.total_messages)?;
        writeln!(f, "Success rate:   {:.1}%", self.success_rate())?;
        if !self.tone_usage.is_empty() {
            writeln!(f, "Tone usage:")?;
            for (tone, count) in &self.tone_usage {
                writeln!(f, "  • {}: {}", tone.title(), count)?;
            }
        }
        if !self.sentiment_distribution.is_empty() {
            writeln!(f, "Sentiment distribution:")?;
            for (sentiment, count) in &self.sentiment_distribution {
                writeln!(f, "  • {}: {}", sentiment, count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_success_only_for_breakdowns() {
        let mut stats = SessionStats::default();
        stats.record(&ReplyResult::replied(
            "a".into(),
            Sentiment::Positive,
            Tone::Humble,
        ));
        stats.record(&ReplyResult::replied(
            "b".into(),
            Sentiment::Positive,
            Tone::Humble,
        ));
        stats.record(&ReplyResult::failed(
            "x".into(),
            Some(Sentiment::Neutral),
            Some(Tone::Inviting),
        ));

        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.successful_replies, 2);
        assert_eq!(stats.tone_usage.get(&Tone::Humble), Some(&2));
        assert!(stats.tone_usage.get(&Tone::Inviting).is_none());
        assert_eq!(stats.sentiment_distribution.get(&Sentiment::Positive), Some(&2));
        assert!((stats.success_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_and_reset() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.success_rate(), 0.0);
        stats.record(&ReplyResult::replied(
            "a".into(),
            Sentiment::Neutral,
            Tone::Inviting,
        ));
        stats.reset();
        assert_eq!(stats, SessionStats::default());
    }

    #[test]
    fn test_display() {
        let mut stats = SessionStats::default();
        stats.record(&ReplyResult::replied(
            "a".into(),
            Sentiment::Struggling,
            Tone::Empathetic,
        ));
        let shown = stats.to_string();
        assert!(shown.contains("Success rate:   100.0%"));
        assert!(shown.contains("Empathetic: 1"));
        assert!(shown.contains("struggling: 1"));
    }
}
