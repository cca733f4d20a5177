//! Interactive chat module
//!
//! Provides a readline-based interactive chat with the gift relay.

mod repl;

pub use repl::ChatRepl;
