//! Relay server configuration (`[server]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
    /// Include the "where to buy" guidance in new sessions.
    pub where_to_buy: bool,
    /// Idle time after which a session is forgotten. Unset keeps sessions
    /// for the life of the process.
    pub session_ttl_secs: Option<u64>,
    /// Least recently used sessions are evicted beyond this count.
    pub max_sessions: Option<usize>,
    /// JSONL transcript of relay events.
    pub conversation_log: Option<String>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            where_to_buy: true,
            session_ttl_secs: None,
            max_sessions: None,
            conversation_log: None,
        }
    }
}

impl FileServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
