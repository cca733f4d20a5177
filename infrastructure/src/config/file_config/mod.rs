//! Raw TOML configuration data types
//!
//! These structs mirror the config file. Every section is optional and falls
//! back to its defaults.

mod client;
mod provider;
mod server;

pub use client::FileClientConfig;
pub use provider::FileProviderConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.model cannot be empty")]
    EmptyModelName,

    #[error("provider.request_timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("server.session_ttl_secs cannot be 0")]
    InvalidSessionTtl,

    #[error("server.max_sessions cannot be 0")]
    InvalidMaxSessions,

    #[error("client.progress_estimate_secs cannot be 0")]
    InvalidProgressEstimate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub provider: FileProviderConfig,
    pub client: FileClientConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.provider.request_timeout_secs == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.server.session_ttl_secs == Some(0) {
            return Err(ConfigValidationError::InvalidSessionTtl);
        }
        if self.server.max_sessions == Some(0) {
            return Err(ConfigValidationError::InvalidMaxSessions);
        }
        if self.client.progress_estimate_secs == Some(0) {
            return Err(ConfigValidationError::InvalidProgressEstimate);
        }
        Ok(())
    }

    /// Resolved settings without the credential, for `show-config` and `/test`.
    pub fn to_public_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
