//! OpenAI-compatible adapter for reply generation.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `GenerationPort` over the chat completions endpoint.

use crate::domain::{DomainError, GenerationRequest};
use crate::ports::GenerationPort;
use crate::shared::config::ReplyConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAI-compatible generation adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `timeout` - Per-request timeout; expiry surfaces as a generation failure
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    /// Build from validated settings.
    pub fn from_config(cfg: &ReplyConfig) -> Result<Self, DomainError> {
        Self::new(
            cfg.api_url.clone(),
            cfg.api_key.clone(),
            Duration::from_secs(cfg.request_timeout_secs),
        )
    }

    /// Human-readable message from an error body.
    ///
    /// OpenAI-style bodies look like `{"error": {"message": "..."}}`; anything else is
    /// truncated to 200 characters.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| body.chars().take(200).collect())
    }

    fn map_status(status: StatusCode, body: &str) -> DomainError {
        let message = Self::error_message(body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                DomainError::Auth(format!("API error {}: {}", status, message))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                DomainError::RateLimited(format!("API error {}: {}", status, message))
            }
            _ => DomainError::Ai(format!("API error {}: {}", status, message)),
        }
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[async_trait::async_trait]
impl GenerationPort for OpenAiAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        info!(
            model = %request.model,
            prompt_len = request.user_instruction.len(),
            "sending prompt to AI"
        );

        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_instruction,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Ai(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|e| {
                debug!(error = %e, "failed to read error body");
                String::new()
            });
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(Self::map_status(status, &text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Ai(format!("Failed to parse API response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Ai("No response choices returned".to_string()))?
            .message
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DomainError::Ai("Response contained no text".to_string()))?;

        debug!(reply_len = content.len(), "received AI response");

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_openai_body() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            OpenAiAdapter::error_message(body),
            "Incorrect API key provided"
        );
    }

    #[test]
    fn test_error_message_plain_body_truncated() {
        let body = "x".repeat(500);
        assert_eq!(OpenAiAdapter::error_message(&body).len(), 200);
    }

    #[test]
    fn test_map_status() {
        assert!(matches!(
            OpenAiAdapter::map_status(StatusCode::UNAUTHORIZED, ""),
            DomainError::Auth(_)
        ));
        assert!(matches!(
            OpenAiAdapter::map_status(StatusCode::TOO_MANY_REQUESTS, ""),
            DomainError::RateLimited(_)
        ));
        let err = OpenAiAdapter::map_status(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, DomainError::Ai(_)));
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "gpt-4",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            max_tokens: 300,
            temperature: 0.5,
            top_p: 0.9,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
    }
}
