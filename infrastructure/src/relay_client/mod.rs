//! Client-side adapters: the HTTP relay client and session-id persistence.

mod http;
mod session_file;

pub use http::HttpRelayClient;
pub use session_file::FileSessionIdStore;
