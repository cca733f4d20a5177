//! Infrastructure layer for gift-genie
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the model provider gateway, session storage,
//! configuration loading, markdown rendering and the client-side relay
//! plumbing.

pub mod config;
pub mod logging;
pub mod provider;
pub mod relay_client;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileClientConfig, FileConfig,
    FileProviderConfig, FileServerConfig,
};
pub use logging::JsonlConversationLogger;
pub use provider::OpenAiChatGateway;
pub use relay_client::{FileSessionIdStore, HttpRelayClient};
pub use render::SanitizedMarkdownRenderer;
pub use session::InMemorySessionStore;
