//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! implement.

pub mod chat_gateway;
pub mod conversation_logger;
pub mod markdown_renderer;
pub mod progress;
pub mod relay_client;
pub mod render_surface;
pub mod session_id_store;
pub mod session_store;
