//! Logging infrastructure: conversation transcripts.
//!
//! [`JsonlConversationLogger`] implements the
//! [`ConversationLogger`](genie_application::ConversationLogger) port by
//! appending one JSON object per relay event.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
