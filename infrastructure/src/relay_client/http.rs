//! HTTP client for the relay server's `POST /api/gift`.

use async_trait::async_trait;
use futures::StreamExt;
use genie_application::ports::relay_client::{ByteStream, ClientError, RelayClient};
use genie_domain::{GiftPrompt, SessionId};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GiftRequest<'a> {
    user_prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct Rejection {
    message: String,
}

pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/gift", server_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// The relay's `{message}`, or the raw body when it is not JSON.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Rejection>(body)
        .map(|r| r.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn open(
        &self,
        prompt: &GiftPrompt,
        session_id: Option<&SessionId>,
    ) -> Result<ByteStream, ClientError> {
        let body = GiftRequest {
            user_prompt: prompt.content(),
            session_id: session_id.map(SessionId::as_str),
        };
        debug!(endpoint = %self.endpoint, "Opening relay stream");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&text),
            });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ClientError::NetworkError(e.to_string())))
            .boxed())
    }
}
