//! Relay events as they travel over the event stream

use crate::core::error::DomainError;
use crate::session::entities::SessionId;
use serde::{Deserialize, Serialize};

/// Payload that marks the end of a successful stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// JSON payload shapes. Externally tagged so `SessionId("x")` is
/// `{"sessionId":"x"}` on the wire.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Payload {
    SessionId(String),
    Content(String),
    Error(String),
}

/// One event emitted by the relay, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// Always the first event of a relay; clients keep it for follow-ups.
    SessionId(SessionId),
    /// A fragment of the reply, not aligned to token or word boundaries.
    Content(String),
    /// The provider failed; terminates the stream.
    Error(String),
    /// The reply is complete.
    Done,
}

impl RelayEvent {
    /// The `data:` payload for this event.
    pub fn to_payload(&self) -> String {
        let payload = match self {
            RelayEvent::Done => return DONE_SENTINEL.to_string(),
            RelayEvent::SessionId(id) => Payload::SessionId(id.as_str().to_string()),
            RelayEvent::Content(text) => Payload::Content(text.clone()),
            RelayEvent::Error(message) => Payload::Error(message.clone()),
        };
        // A single-variant enum holding a String cannot fail to serialize.
        serde_json::to_string(&payload).unwrap_or_default()
    }

    /// The full frame, including the blank-line delimiter.
    pub fn to_frame(&self) -> String {
        format!("data: {}\n\n", self.to_payload())
    }

    /// Interpret a decoded `data:` payload.
    pub fn from_payload(data: &str) -> Result<Self, DomainError> {
        if data.trim() == DONE_SENTINEL {
            return Ok(RelayEvent::Done);
        }
        let payload: Payload = serde_json::from_str(data)
            .map_err(|e| DomainError::ProtocolDecode(format!("{e}: {data}")))?;
        Ok(match payload {
            Payload::SessionId(id) => RelayEvent::SessionId(SessionId::new(id)),
            Payload::Content(text) => RelayEvent::Content(text),
            Payload::Error(message) => RelayEvent::Error(message),
        })
    }

    /// True for `Error` and `Done`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RelayEvent::Error(_) | RelayEvent::Done)
    }
}
