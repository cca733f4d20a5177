//! Client-side rendering rules.
//!
//! - [`queue::RenderQueue`]: not-yet-revealed characters
//! - [`pacing::PacingPolicy`]: how much to reveal per tick and when to tick again
//! - [`progress::ProgressCurve`]: pre-first-token progress animation
//! - [`lifecycle::RequestPhase`]: request state machine

pub mod lifecycle;
pub mod pacing;
pub mod progress;
pub mod queue;
