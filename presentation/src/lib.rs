//! Presentation layer for gift-genie
//!
//! This crate contains the HTTP relay server, CLI definitions, the terminal
//! render surface, progress reporting and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, ClientArgs, Command};
pub use output::console::ConsoleFormatter;
pub use output::surface::TerminalSurface;
pub use progress::reporter::ProgressBarIndicator;
pub use server::{AppState, PublicEnv, router, serve};
