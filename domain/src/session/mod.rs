//! Conversation session domain.
//!
//! - [`entities::Session`]: a conversation held by the relay
//! - [`entities::Turn`]: a single message within a session
//! - [`stream::StreamEvent`]: incremental events from the model provider

pub mod entities;
pub mod stream;
