//! Model provider configuration (`[provider]` section)

use serde::{Deserialize, Serialize};
use std::fmt;

/// OpenAI-compatible chat-completion endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub model: String,
    /// Base URL; `/chat/completions` is appended.
    pub url: String,
    /// Bearer credential. Never serialized back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for FileProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileProviderConfig")
            .field("model", &self.model)
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
