//! Model identifier value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of the chat-completion model (Value Object)
///
/// Providers accept arbitrary model names (`gpt-4o-mini`,
/// `meta-llama/llama-3.1-8b-instruct`, ...), so the only rule is that the
/// name is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self("gpt-4o-mini".to_string())
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModelId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err(DomainError::InvalidModel(s.to_string()))
        } else {
            Ok(Self(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model() {
        let model: ModelId = "gpt-4o-mini".parse().unwrap();
        assert_eq!(model.as_str(), "gpt-4o-mini");
        assert_eq!(model.to_string(), "gpt-4o-mini");
    }

    #[test]
    fn test_blank_model_rejected() {
        assert!("   ".parse::<ModelId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let model: ModelId = "llama3".parse().unwrap();
        assert_eq!(serde_json::to_string(&model).unwrap(), "\"llama3\"");
    }
}
