//! Terminal client configuration (`[client]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClientConfig {
    /// Relay server the client talks to.
    pub server_url: String,
    pub show_progress: bool,
    /// Expected wait for the first token, in seconds.
    pub progress_estimate_secs: Option<u64>,
    /// Mirror the sanitized HTML document into this file.
    pub html_out: Option<String>,
}

impl Default for FileClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3001".to_string(),
            show_progress: true,
            progress_estimate_secs: None,
            html_out: None,
        }
    }
}

impl FileClientConfig {
    pub fn progress_estimate(&self) -> Option<Duration> {
        self.progress_estimate_secs.map(Duration::from_secs)
    }
}
