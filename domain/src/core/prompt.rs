//! Gift prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user's free-text request for gift ideas (Value Object)
///
/// Always non-empty after trimming. The original text is kept as typed so
/// the conversation history shows exactly what the user sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GiftPrompt {
    content: String,
}

impl GiftPrompt {
    /// Validate a raw prompt.
    ///
    /// Empty and whitespace-only input is rejected with
    /// [`DomainError::InvalidInput`].
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::InvalidInput)
        } else {
            Ok(Self { content })
        }
    }

    /// Validate an optional raw prompt (a missing field is the same as empty).
    pub fn from_optional(content: Option<String>) -> Result<Self, DomainError> {
        content.map_or(Err(DomainError::InvalidInput), Self::try_new)
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for GiftPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for GiftPrompt {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        GiftPrompt::try_new(s)
    }
}

impl From<GiftPrompt> for String {
    fn from(p: GiftPrompt) -> Self {
        p.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let p = GiftPrompt::try_new("birthday gift for a cat lover, budget 20").unwrap();
        assert_eq!(p.content(), "birthday gift for a cat lover, budget 20");
    }

    #[test]
    fn test_try_new_empty() {
        assert_eq!(GiftPrompt::try_new(""), Err(DomainError::InvalidInput));
        assert_eq!(GiftPrompt::try_new("  \n\t "), Err(DomainError::InvalidInput));
    }

    #[test]
    fn test_missing_prompt_is_invalid() {
        assert_eq!(GiftPrompt::from_optional(None), Err(DomainError::InvalidInput));
    }

    #[test]
    fn test_keeps_original_whitespace() {
        let p = GiftPrompt::try_new("  socks  ").unwrap();
        assert_eq!(p.content(), "  socks  ");
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<GiftPrompt>("\"   \"").is_err());
        let p: GiftPrompt = serde_json::from_str("\"a mug\"").unwrap();
        assert_eq!(p.content(), "a mug");
    }
}
