//! Mock generation adapter for testing without API calls.
//!
//! Replays scripted responses in order, then falls back to a fixed reply.
//! Every request is recorded so tests can inspect the prompt that was sent.

use crate::domain::{DomainError, GenerationRequest};
use crate::ports::GenerationPort;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

const DEFAULT_MOCK_REPLY: &str = "[MOCK] What a meaningful thing to share. \
What stood out to you most?";

/// Mock adapter. Returns predetermined replies or failures without network access.
pub struct MockGenerationAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    default_reply: String,
    script: Mutex<VecDeque<Result<String, DomainError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerationAdapter {
    /// Create a new mock adapter with no delay and the default reply.
    pub fn new() -> Self {
        Self {
            delay_ms: 0,
            default_reply: DEFAULT_MOCK_REPLY.to_string(),
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Simulate network latency on every call.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Reply returned once the script is exhausted.
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// Queue one reply.
    pub fn then_reply(self, reply: impl Into<String>) -> Self {
        self.push(Ok(reply.into()));
        self
    }

    /// Queue one failure.
    pub fn then_fail(self, error: DomainError) -> Self {
        self.push(Err(error));
        self
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn push(&self, outcome: Result<String, DomainError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
    }
}

impl Default for MockGenerationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerationPort for MockGenerationAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        info!(
            model = %request.model,
            prompt_len = request.user_instruction.len(),
            "[MOCK] Simulating AI generation"
        );

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        scripted.unwrap_or_else(|| Ok(self.default_reply.clone()))
    }
}
