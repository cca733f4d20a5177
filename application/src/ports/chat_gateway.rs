//! Chat gateway port
//!
//! Defines the interface for streaming chat completions from a model provider.

use async_trait::async_trait;
use genie_domain::{ModelId, StreamEvent, Turn};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider returned {status}: {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Stream closed before completion")]
    StreamClosed,
}

/// Gateway for chat completions
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// The model requests are sent to.
    fn model(&self) -> &ModelId;

    /// Start a streaming completion over the full ordered turn sequence.
    ///
    /// The returned handle yields zero or more `Delta` events followed by one
    /// `Completed` or `Error`. Dropping the handle abandons the request.
    async fn stream_chat(&self, turns: &[Turn]) -> Result<StreamHandle, GatewayError>;
}

/// Handle for receiving streaming events from a provider.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// A handle that yields the given events, then closes.
    pub fn from_events(events: Vec<StreamEvent>) -> Self {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            // Capacity covers every event.
            let _ = tx.try_send(event);
        }
        Self::new(rx)
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => return Err(GatewayError::RequestFailed(e)),
            }
        }
        Err(GatewayError::StreamClosed)
    }
}
