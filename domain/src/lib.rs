//! Domain layer for gift-genie
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A conversation held by the relay server. The first turn of every session
//! is a single system turn built by [`GiftPromptTemplate`]; user and assistant
//! turns are appended in order.
//!
//! ## Relay protocol
//!
//! The relay talks to clients with `data: <payload>` frames separated by a
//! blank line. [`RelayEvent`] is the payload, [`FrameDecoder`] reassembles
//! frames from arbitrarily split byte chunks.
//!
//! ## Rendering
//!
//! [`RenderQueue`] and [`PacingPolicy`] describe how buffered text is revealed
//! at a self-adjusting pace, [`ProgressCurve`] drives the pre-first-token
//! progress bar and [`RequestPhase`] is the client request lifecycle.

pub mod core;
pub mod prompt;
pub mod relay;
pub mod render;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, model::ModelId, prompt::GiftPrompt};
pub use prompt::GiftPromptTemplate;
pub use relay::{
    event::{DONE_SENTINEL, RelayEvent},
    frame::{DecodedFrame, FrameDecoder},
};
pub use render::{
    lifecycle::{LifecycleError, RequestPhase},
    pacing::PacingPolicy,
    progress::ProgressCurve,
    queue::RenderQueue,
};
pub use session::{
    entities::{Role, Session, SessionId, Turn},
    stream::StreamEvent,
};
