//! Application use cases. Orchestrate domain logic via ports.

pub mod reply_service;

pub use reply_service::ReplyService;
