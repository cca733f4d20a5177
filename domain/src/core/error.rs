//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Empty, whitespace-only or missing prompt. The display text is the
    /// relay's wire message.
    #[error("No userPrompt")]
    InvalidInput,

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Malformed frame payload: {0}")]
    ProtocolDecode(String),
}
