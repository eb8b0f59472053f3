//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing or invalid configuration. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Provider quota or rate limit hit. Not retried.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("AI generation failed: {0}")]
    Ai(String),

    #[error("Batch file error: {0}")]
    Batch(String),

    #[error("UI error: {0}")]
    Ui(String),
}
