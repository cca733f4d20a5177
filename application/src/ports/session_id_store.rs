//! Client-side persistence of the current session id.

use super::relay_client::ClientError;
use genie_domain::SessionId;
use std::sync::Mutex;

pub trait SessionIdStore: Send + Sync {
    /// The stored id, if any. Unreadable storage counts as empty.
    fn load(&self) -> Option<SessionId>;

    fn save(&self, id: &SessionId) -> Result<(), ClientError>;

    fn clear(&self) -> Result<(), ClientError>;
}

/// Keeps the id for the life of the process.
#[derive(Default)]
pub struct InMemorySessionIdStore {
    current: Mutex<Option<SessionId>>,
}

impl InMemorySessionIdStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionIdStore for InMemorySessionIdStore {
    fn load(&self) -> Option<SessionId> {
        self.current.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, id: &SessionId) -> Result<(), ClientError> {
        let mut guard = self
            .current
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        *guard = Some(id.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self
            .current
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
