//! Relay client port
//!
//! Opens the event stream against a relay server.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use genie_domain::{DomainError, GiftPrompt, LifecycleError, SessionId};
use thiserror::Error;

/// Errors that end a client request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    /// The relay answered with a non-2xx status before streaming.
    #[error("Relay rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    /// The provider failed mid-stream; carries the streamed message.
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Session id storage failed: {0}")]
    Storage(String),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl ClientError {
    /// The provider message to show under the apology, if any.
    ///
    /// Only an in-band provider error is shown; relay rejections and network
    /// failures are logged but not displayed.
    pub fn displayed_detail(&self) -> Option<&str> {
        match self {
            ClientError::ProviderError(message) => Some(message),
            _ => None,
        }
    }

    pub fn stream_ended() -> Self {
        ClientError::NetworkError("stream ended unexpectedly".to_string())
    }
}

/// Raw body bytes of a relay response.
pub type ByteStream = BoxStream<'static, Result<Bytes, ClientError>>;

#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Send the prompt and return the response body once the relay has
    /// accepted it with a 2xx status.
    async fn open(
        &self,
        prompt: &GiftPrompt,
        session_id: Option<&SessionId>,
    ) -> Result<ByteStream, ClientError>;
}
