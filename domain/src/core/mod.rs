//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`]: identifier of the chat-completion model
//! - [`prompt::GiftPrompt`]: a validated user prompt
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod prompt;
