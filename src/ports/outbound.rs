//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, GenerationRequest};

/// Text generation provider. One call in, one completion out.
///
/// Implementations map transport, auth, quota and decoding failures into
/// `DomainError`; they never retry.
#[async_trait::async_trait]
pub trait GenerationPort: Send + Sync {
    /// Generate a completion for the given system/user instruction pair.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, DomainError>;
}
