//! Client stream consumer.
//!
//! Turns the relay's raw body into [`RelayEvent`]s. Frames are reassembled
//! with [`FrameDecoder`], so chunk boundaries never matter.

use crate::ports::relay_client::{ByteStream, ClientError};
use futures::stream::{self, BoxStream, StreamExt};
use genie_domain::{DecodedFrame, FrameDecoder, RelayEvent};
use std::collections::VecDeque;
use tracing::warn;

struct ConsumerState {
    body: ByteStream,
    decoder: FrameDecoder,
    ready: VecDeque<DecodedFrame>,
    body_ended: bool,
    finished: bool,
}

/// Decode a relay body into events.
///
/// Yields `SessionId`, `Content` and finally `Done`. A streamed `{error}`
/// becomes [`ClientError::ProviderError`], a body that ends without a
/// terminal event becomes a `NetworkError`. Malformed payloads are logged and
/// skipped. Nothing is yielded after the first terminal item.
pub fn relay_events(body: ByteStream) -> BoxStream<'static, Result<RelayEvent, ClientError>> {
    let state = ConsumerState {
        body,
        decoder: FrameDecoder::new(),
        ready: VecDeque::new(),
        body_ended: false,
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if state.finished {
                return None;
            }

            if let Some(frame) = state.ready.pop_front() {
                match frame.relay_event() {
                    Ok(RelayEvent::Error(message)) => {
                        state.finished = true;
                        return Some((Err(ClientError::ProviderError(message)), state));
                    }
                    Ok(event) => {
                        state.finished = event.is_terminal();
                        return Some((Ok(event), state));
                    }
                    Err(e) => {
                        warn!("Skipping relay frame: {}", e);
                        continue;
                    }
                }
            }

            if state.body_ended {
                state.finished = true;
                return Some((Err(ClientError::stream_ended()), state));
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let frames = state.decoder.push(&chunk);
                    state.ready.extend(frames);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(e), state));
                }
                None => {
                    state.body_ended = true;
                    state.ready.extend(state.decoder.finish());
                }
            }
        }
    })
    .boxed()
}
