//! Infrastructure adapters. Implement ports.
//!
//! LLM provider, batch files, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod persistence;
pub mod ui;
