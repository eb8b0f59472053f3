//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here: sentiment classification, tone resolution
//! and prompt composition. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod prompt;
pub mod sentiment;
pub mod tone;

pub use entities::{
    GenerationRequest, ReplyResult, Sentiment, Tone, ToneExample, ToneProfile,
};
pub use errors::DomainError;
pub use prompt::{SYSTEM_PERSONA, compose, compose_named};
pub use sentiment::classify;
pub use tone::{FALLBACK_TONE, resolve_tone};
