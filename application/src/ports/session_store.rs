//! Session store port
//!
//! Server-side conversation history keyed by session id.

use async_trait::async_trait;
use genie_domain::{SessionId, Turn};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("System turns can only open a session")]
    MisplacedSystemTurn,

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Result of [`SessionStore::resolve_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResolution {
    pub id: SessionId,
    /// A new session was minted (requested id missing, unknown or expired).
    pub created: bool,
}

/// Storage for conversation sessions.
///
/// Each call is atomic on its own; there is no locking across calls, so two
/// requests on the same session interleave their appends.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the requested session if it is live, otherwise mint a new one
    /// seeded with a single system turn.
    ///
    /// The returned session is leased to the caller: it is neither expired
    /// nor evicted until a matching [`SessionStore::release`].
    async fn resolve_or_create(
        &self,
        requested: Option<&SessionId>,
        system_prompt: &str,
    ) -> Result<SessionResolution, SessionStoreError>;

    /// Append a user or assistant turn.
    async fn append(&self, id: &SessionId, turn: Turn) -> Result<(), SessionStoreError>;

    /// Ordered copy of a session's turns.
    async fn history(&self, id: &SessionId) -> Result<Vec<Turn>, SessionStoreError>;

    /// Drop one lease taken by `resolve_or_create`. The idle clock restarts
    /// from here.
    async fn release(&self, id: &SessionId);

    /// Number of live sessions.
    async fn session_count(&self) -> usize;
}
