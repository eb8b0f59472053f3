//! Reply service. Orchestrates sentiment, tone, prompt and the generation call.
//!
//! Provider failures are captured into `ReplyResult` and never returned as `Err`.

use crate::domain::{
    GenerationRequest, ReplyResult, SYSTEM_PERSONA, classify, compose, resolve_tone,
};
use crate::ports::GenerationPort;
use crate::shared::config::ReplyConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Service for tone-matched reply generation.
///
/// Orchestrates the flow:
/// 1. Classify the comment's sentiment
/// 2. Resolve the tone (override or sentiment mapping)
/// 3. Compose the instruction prompt
/// 4. Send to the generation port and package the result
pub struct ReplyService {
    generator: Arc<dyn GenerationPort>,
    config: Arc<ReplyConfig>,
}

impl ReplyService {
    /// Create a new reply service.
    ///
    /// # Arguments
    /// * `generator` - Generation port implementation (OpenAI, Mock, etc.)
    /// * `config` - Validated settings: default model and sampling parameters
    pub fn new(generator: Arc<dyn GenerationPort>, config: Arc<ReplyConfig>) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &ReplyConfig {
        &self.config
    }

    /// Generate a reply for one comment.
    ///
    /// `tone_override` names a tone (case-insensitive); unknown names use `inviting`.
    /// `model_override` replaces the configured model when non-blank.
    pub async fn generate_reply(
        &self,
        comment: &str,
        tone_override: Option<&str>,
        model_override: Option<&str>,
    ) -> ReplyResult {
        let model = model_override
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.config.model);

        let sentiment = classify(comment);
        let tone = resolve_tone(sentiment, tone_override);
        let prompt = compose(comment, tone);

        info!(
            sentiment = %sentiment,
            tone = %tone,
            model,
            comment_len = comment.len(),
            "generating reply"
        );

        let request = GenerationRequest {
            system_instruction: SYSTEM_PERSONA.to_string(),
            user_instruction: prompt,
            model: model.to_string(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        match self.generator.generate(&request).await {
            Ok(text) => ReplyResult::replied(text.trim().to_string(), sentiment, tone),
            Err(e) => {
                warn!(sentiment = %sentiment, tone = %tone, error = %e, "reply generation failed");
                ReplyResult::failed(e.to_string(), Some(sentiment), Some(tone))
            }
        }
    }

    /// Generate replies for many comments, one after another.
    ///
    /// Output order matches input order. A failed comment never stops the batch.
    pub async fn generate_many(
        &self,
        comments: &[String],
        overrides: &HashMap<usize, String>,
    ) -> Vec<ReplyResult> {
        let mut results = Vec::with_capacity(comments.len());
        for (index, comment) in comments.iter().enumerate() {
            let tone_override = overrides.get(&index).map(String::as_str);
            results.push(self.generate_reply(comment, tone_override, None).await);
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        info!(
            total = results.len(),
            succeeded,
            failed = results.len() - succeeded,
            "batch complete"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerationAdapter;
    use crate::domain::{DomainError, Sentiment, Tone, prompt::tone_block};

    fn service(mock: Arc<MockGenerationAdapter>) -> ReplyService {
        ReplyService::new(mock, Arc::new(ReplyConfig::with_api_key("sk-test")))
    }

    #[tokio::test]
    async fn test_struggling_comment_uses_empathetic_prompt() {
        let mock = Arc::new(MockGenerationAdapter::new().then_reply("  You're not alone.  "));
        let svc = service(Arc::clone(&mock));

        let result = svc
            .generate_reply("I'm struggling to believe this applies to me.", None, None)
            .await;

        assert!(result.success);
        assert_eq!(result.reply.as_deref(), Some("You're not alone."));
        assert_eq!(result.sentiment_detected, Some(Sentiment::Struggling));
        assert_eq!(result.tone_used, Some(Tone::Empathetic));
        assert!(result.error.is_none());

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].user_instruction.contains(&tone_block(Tone::Empathetic)));
        assert_eq!(sent[0].system_instruction, SYSTEM_PERSONA);
    }

    #[tokio::test]
    async fn test_config_parameters_are_forwarded() {
        let mock = Arc::new(MockGenerationAdapter::new());
        let config = ReplyConfig {
            model: "gpt-4o-mini".into(),
            max_tokens: 150,
            temperature: 0.2,
            top_p: 0.5,
            ..ReplyConfig::with_api_key("sk-test")
        };
        let svc = ReplyService::new(mock.clone(), Arc::new(config));

        svc.generate_reply("Nice post.", None, None).await;
        svc.generate_reply("Nice post.", None, Some("gpt-4o")).await;
        svc.generate_reply("Nice post.", None, Some("  ")).await;

        let sent = mock.requests();
        assert_eq!(sent[0].model, "gpt-4o-mini");
        assert_eq!(sent[0].max_tokens, 150);
        assert!((sent[0].temperature - 0.2).abs() < f32::EPSILON);
        assert!((sent[0].top_p - 0.5).abs() < f32::EPSILON);
        assert_eq!(sent[1].model, "gpt-4o");
        assert_eq!(sent[2].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_override_wins_but_sentiment_still_computed() {
        let mock = Arc::new(MockGenerationAdapter::new());
        let svc = service(mock);

        let result = svc.generate_reply("Nice post.", Some("witty"), None).await;
        assert_eq!(result.sentiment_detected, Some(Sentiment::Neutral));
        assert_eq!(result.tone_used, Some(Tone::Witty));
    }

    #[tokio::test]
    async fn test_failure_keeps_sentiment_and_tone() {
        let mock = Arc::new(
            MockGenerationAdapter::new().then_fail(DomainError::Auth("invalid key".into())),
        );
        let svc = service(mock);

        let result = svc
            .generate_reply("Why does this keep happening to me?", None, None)
            .await;

        assert!(!result.success);
        assert!(result.reply.is_none());
        assert_eq!(result.sentiment_detected, Some(Sentiment::Questioning));
        assert_eq!(result.tone_used, Some(Tone::Biblical));
        assert_eq!(
            result.error.as_deref(),
            Some("Authentication failed: invalid key")
        );
    }

    #[tokio::test]
    async fn test_generate_many_isolates_failures() {
        let mock = Arc::new(
            MockGenerationAdapter::new()
                .then_reply("one")
                .then_fail(DomainError::RateLimited("quota".into()))
                .then_reply("three"),
        );
        let svc = service(Arc::clone(&mock));
        let comments = vec![
            "Thank you!".to_string(),
            "Why?".to_string(),
            "Nice post.".to_string(),
        ];
        let overrides = HashMap::from([(2, "Witty".to_string())]);

        let results = svc.generate_many(&comments, &overrides).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].reply.as_deref(), Some("one"));
        assert!(!results[1].success);
        assert_eq!(results[1].tone_used, Some(Tone::Biblical));
        assert_eq!(results[2].reply.as_deref(), Some("three"));
        assert_eq!(results[2].tone_used, Some(Tone::Witty));
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_generate_many_empty() {
        let svc = service(Arc::new(MockGenerationAdapter::new()));
        assert!(svc.generate_many(&[], &HashMap::new()).await.is_empty());
    }
}
