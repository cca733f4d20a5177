//! OpenAI-compatible streaming chat gateway.
//!
//! POSTs the turn list to `{url}/chat/completions` with `stream: true` and
//! reads the SSE body with [`FrameDecoder`]. Each chunk's
//! `choices[].delta.content` becomes a [`StreamEvent::Delta`]; `[DONE]` ends
//! the stream with [`StreamEvent::Completed`].

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use genie_application::ports::chat_gateway::{ChatGateway, GatewayError, StreamHandle};
use genie_domain::util::preview;
use genie_domain::{FrameDecoder, ModelId, StreamEvent, Turn};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

const STREAM_BUFFER: usize = 64;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    stream: bool,
}

#[derive(Deserialize)]
struct ChunkResponse {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<ProviderErrorBody>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// What one provider chunk contributed.
#[derive(Debug, Default, PartialEq, Eq)]
struct ParsedChunk {
    text: String,
    finished: bool,
}

pub struct OpenAiChatGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: ModelId,
}

impl OpenAiChatGateway {
    pub fn new(
        base_url: &str,
        model: ModelId,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.filter(|key| !key.is_empty()),
            model,
        })
    }

    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let model = config
            .model
            .parse::<ModelId>()
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
        Self::new(
            &config.url,
            model,
            config.api_key.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::ConnectionError(e.to_string())
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl ChatGateway for OpenAiChatGateway {
    fn model(&self) -> &ModelId {
        &self.model
    }

    async fn stream_chat(&self, turns: &[Turn]) -> Result<StreamHandle, GatewayError> {
        debug!(model = %self.model, turns = turns.len(), "Requesting chat completion");
        let body = ChatRequest {
            model: self.model.as_str(),
            messages: turns,
            stream: true,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await.map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("Chat API returned error status: {}", status);
            return Err(GatewayError::ProviderStatus {
                status: status.as_u16(),
                body: error_message(&text),
            });
        }

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(pump(response.bytes_stream(), tx));
        Ok(StreamHandle::new(rx))
    }
}

/// Human-readable message from an error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => preview(body, 300),
    }
}

/// Interpret one `data:` payload. `Err` carries an in-stream provider error.
fn parse_chunk(data: &str) -> Result<ParsedChunk, String> {
    let chunk: ChunkResponse = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            debug!("Failed to parse chunk: {} - Raw data: {}", e, data);
            return Ok(ParsedChunk::default());
        }
    };
    if let Some(error) = chunk.error {
        return Err(error.message);
    }
    let mut parsed = ParsedChunk::default();
    for choice in chunk.choices {
        if let Some(content) = choice.delta.content {
            parsed.text.push_str(&content);
        }
        parsed.finished |= choice.finish_reason.is_some();
    }
    Ok(parsed)
}

/// Forward the provider body into `tx` until `[DONE]`, an error, or the
/// receiver going away. Returning drops the body, aborting the HTTP read.
async fn pump<S, E>(body: S, tx: mpsc::Sender<StreamEvent>)
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut body = std::pin::pin!(body);
    let mut decoder = FrameDecoder::new();
    let mut full_text = String::new();
    let mut finished = false;

    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                debug!("Stream receiver dropped, aborting provider read");
                return;
            }
            next = body.next() => next,
        };

        let at_end = next.is_none();
        let frames = match next {
            Some(Ok(chunk)) => decoder.push(&chunk),
            Some(Err(e)) => {
                warn!("Error reading provider stream: {}", e);
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
            None => decoder.finish().into_iter().collect(),
        };

        for frame in frames {
            if frame.is_done() {
                let _ = tx.send(StreamEvent::Completed(full_text)).await;
                return;
            }
            match parse_chunk(&frame.data) {
                Ok(parsed) => {
                    finished |= parsed.finished;
                    if parsed.text.is_empty() {
                        continue;
                    }
                    full_text.push_str(&parsed.text);
                    if tx.send(StreamEvent::Delta(parsed.text)).await.is_err() {
                        return;
                    }
                }
                Err(message) => {
                    let _ = tx.send(StreamEvent::Error(message)).await;
                    return;
                }
            }
        }

        if at_end {
            let event = if finished {
                StreamEvent::Completed(full_text)
            } else {
                StreamEvent::Error("Provider stream ended before [DONE]".to_string())
            };
            let _ = tx.send(event).await;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::io;

    fn chunk(content: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({ "choices": [{ "delta": { "content": content }, "finish_reason": null }] })
        )
    }

    async fn run(chunks: Vec<String>) -> Vec<StreamEvent> {
        let body = stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok::<_, io::Error>(Bytes::from(c))),
        );
        let (tx, mut rx) = mpsc::channel(16);
        pump(body, tx).await;
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_request_body_shape() {
        let turns = vec![Turn::system("be helpful"), Turn::user("gift ideas")];
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: &turns,
            stream: true,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "be helpful" },
                    { "role": "user", "content": "gift ideas" }
                ],
                "stream": true
            })
        );
    }

    #[test]
    fn test_parse_chunk_variants() {
        assert_eq!(
            parse_chunk(r#"{"choices":[{"delta":{"content":"Hi"},"finish_reason":null}]}"#),
            Ok(ParsedChunk { text: "Hi".into(), finished: false })
        );
        assert_eq!(
            parse_chunk(r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#),
            Ok(ParsedChunk { text: String::new(), finished: true })
        );
        assert_eq!(
            parse_chunk(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#),
            Ok(ParsedChunk::default())
        );
        assert_eq!(
            parse_chunk(r#"{"error":{"message":"Rate limit reached"}}"#),
            Err("Rate limit reached".to_string())
        );
        assert_eq!(parse_chunk("not json"), Ok(ParsedChunk::default()));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#),
            "Incorrect API key provided"
        );
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_pump_forwards_deltas_then_completes() {
        let mut chunks = vec![chunk("1. Cat"), chunk(" tree"), chunk("")];
        chunks.push("data: [DONE]\n\n".to_string());
        let events = run(chunks).await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("1. Cat".into()),
                StreamEvent::Delta(" tree".into()),
                StreamEvent::Completed("1. Cat tree".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_pump_handles_frames_split_across_chunks() {
        let whole = format!("{}{}data: [DONE]\n\n", chunk("Mug"), chunk(" ☕"));
        let (a, b) = whole.split_at(17);
        let events = run(vec![a.to_string(), b.to_string()]).await;
        assert_eq!(events.last(), Some(&StreamEvent::Completed("Mug ☕".into())));
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_pump_in_stream_error() {
        let events = run(vec![
            chunk("partial"),
            "data: {\"error\":{\"message\":\"overloaded\"}}\n\n".to_string(),
        ])
        .await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("partial".into()),
                StreamEvent::Error("overloaded".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_pump_eof_without_done() {
        let events = run(vec![chunk("cut")]).await;
        assert!(matches!(events.last(), Some(StreamEvent::Error(_))));

        let finished = format!(
            "data: {}\n\n",
            serde_json::json!({ "choices": [{ "delta": {}, "finish_reason": "stop" }] })
        );
        let events = run(vec![chunk("ok"), finished]).await;
        assert_eq!(events.last(), Some(&StreamEvent::Completed("ok".into())));
    }

    #[tokio::test]
    async fn test_pump_transport_error() {
        let body = stream::iter(vec![
            Ok(Bytes::from(chunk("a"))),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ]);
        let (tx, mut rx) = mpsc::channel(16);
        pump(body, tx).await;
        assert_eq!(rx.recv().await, Some(StreamEvent::Delta("a".into())));
        assert_eq!(rx.recv().await, Some(StreamEvent::Error("reset".into())));
    }

    #[tokio::test]
    async fn test_pump_stops_when_receiver_dropped() {
        let body = stream::iter(vec![Ok::<_, io::Error>(Bytes::from(chunk("a")))])
            .chain(stream::pending());
        let (tx, rx) = mpsc::channel(16);
        drop(rx);
        // Returns instead of waiting on the pending body.
        pump(body, tx).await;
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway = OpenAiChatGateway::new(
            "http://localhost:11434/v1/",
            ModelId::default(),
            Some(String::new()),
            None,
        )
        .unwrap();
        assert_eq!(gateway.endpoint(), "http://localhost:11434/v1/chat/completions");
        assert!(gateway.api_key.is_none());
    }
}
