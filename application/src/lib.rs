//! Application layer for gift-genie
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ClientParams, RelayParams};
pub use ports::{
    chat_gateway::{ChatGateway, GatewayError, StreamHandle},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    markdown_renderer::MarkdownRenderer,
    progress::{NoProgress, ProgressIndicator},
    relay_client::{ByteStream, ClientError, RelayClient},
    render_surface::{RenderSurface, RenderedDocument},
    session_id_store::{InMemorySessionIdStore, SessionIdStore},
    session_store::{SessionResolution, SessionStore, SessionStoreError},
};
pub use use_cases::ask_gift::{APOLOGY, AskGiftUseCase, AskOutcome};
pub use use_cases::consume_stream::relay_events;
pub use use_cases::progress_ticker::ProgressTicker;
pub use use_cases::relay_gift::{
    RelayError, RelayGiftInput, RelayGiftUseCase, RelayOutcome, RelayStream,
};
pub use use_cases::render_pacer::{FixedJitter, Jitter, RandomJitter, RenderPacer};
