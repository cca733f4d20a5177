//! Prompt domain
//!
//! The system instruction that seeds every new gift conversation.

mod template;

pub use template::GiftPromptTemplate;
