//! Relay wire protocol.
//!
//! - [`event::RelayEvent`]: payloads the relay sends to clients
//! - [`frame::FrameDecoder`]: incremental `data:` frame decoder

pub mod event;
pub mod frame;
