//! Use cases
//!
//! Application-level operations that orchestrate domain logic.
//!
//! Server side: [`relay_gift`]. Client side: [`ask_gift`], built on
//! [`consume_stream`], [`render_pacer`] and [`progress_ticker`].

pub mod ask_gift;
pub mod consume_stream;
pub mod progress_ticker;
pub mod relay_gift;
pub mod render_pacer;
