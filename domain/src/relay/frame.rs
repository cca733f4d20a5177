//! Incremental decoder for `data:` event-stream frames.
//!
//! Frames are separated by a blank line. Bytes are buffered until a complete
//! delimiter is seen, so a frame (or a multi-byte UTF-8 character) split
//! across network reads is only decoded once it is whole. Carriage returns
//! are dropped on input, which turns `\r\n\r\n` into the same delimiter.

use super::event::{DONE_SENTINEL, RelayEvent};
use crate::core::error::DomainError;

const DELIMITER: &[u8] = b"\n\n";

/// The `data` of one complete frame. Multiple `data:` lines are joined with
/// `\n`; comments and other fields are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub data: String,
}

impl DecodedFrame {
    pub fn is_done(&self) -> bool {
        self.data.trim() == DONE_SENTINEL
    }

    /// Interpret the frame as a relay event.
    pub fn relay_event(&self) -> Result<RelayEvent, DomainError> {
        RelayEvent::from_payload(&self.data)
    }
}

/// Accumulate-until-delimiter, emit, repeat.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    /// Bytes of `buffer` already searched for a delimiter.
    scanned: usize,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network read; returns every frame it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<DecodedFrame> {
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut frames = Vec::new();
        loop {
            let Some(pos) = find(&self.buffer[self.scanned..], DELIMITER) else {
                // Keep the last byte unscanned: it may be the first half of
                // a delimiter completed by the next chunk.
                self.scanned = self.buffer.len().saturating_sub(DELIMITER.len() - 1);
                break;
            };
            let end = self.scanned + pos;
            let raw: Vec<u8> = self.buffer.drain(..end + DELIMITER.len()).collect();
            self.scanned = 0;
            if let Some(frame) = parse_frame(&raw[..end]) {
                frames.push(frame);
            }
        }
        frames
    }

    /// End of input: decode a trailing frame that never got its delimiter.
    pub fn finish(&mut self) -> Option<DecodedFrame> {
        let raw = std::mem::take(&mut self.buffer);
        self.scanned = 0;
        parse_frame(&raw)
    }

    /// Bytes held back waiting for a delimiter.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn parse_frame(raw: &[u8]) -> Option<DecodedFrame> {
    let text = String::from_utf8_lossy(raw);
    let mut data: Option<String> = None;

    for line in text.split('\n') {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field != "data" {
            continue;
        }
        match data.as_mut() {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(value);
            }
            None => data = Some(value.to_string()),
        }
    }

    data.map(|data| DecodedFrame { data })
}
