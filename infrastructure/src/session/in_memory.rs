//! In-memory session store.
//!
//! Sessions live in a `RwLock<HashMap>` for the life of the process unless
//! an idle TTL or a session cap is configured. Expired sessions are purged
//! lazily, on access and whenever a new session is minted. A leased session
//! is never expired or evicted.

use async_trait::async_trait;
use genie_application::ports::session_store::{
    SessionResolution, SessionStore, SessionStoreError,
};
use genie_domain::{Session, SessionId, Turn};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

struct Entry {
    session: Session,
    last_access: Instant,
    /// Relays still streaming into this session.
    leases: usize,
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    ttl: Option<Duration>,
    max_sessions: Option<usize>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget sessions idle for longer than `ttl`.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Evict the least recently used session beyond `max` sessions.
    pub fn with_max_sessions(mut self, max: Option<usize>) -> Self {
        self.max_sessions = max;
        self
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        entry.leases == 0
            && self
                .ttl
                .is_some_and(|ttl| now.duration_since(entry.last_access) > ttl)
    }

    fn purge_expired(&self, sessions: &mut HashMap<SessionId, Entry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        let purged = before - sessions.len();
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }
    }

    /// Returns false when every session is leased.
    fn evict_lru(sessions: &mut HashMap<SessionId, Entry>) -> bool {
        let oldest = sessions
            .iter()
            .filter(|(_, entry)| entry.leases == 0)
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(id, _)| id.clone());
        match oldest {
            Some(id) => {
                sessions.remove(&id);
                debug!(session_id = %id, "Evicted least recently used session");
                true
            }
            None => false,
        }
    }

    /// Look up a live session, refreshing its access time.
    fn live<'a>(
        &self,
        sessions: &'a mut HashMap<SessionId, Entry>,
        id: &SessionId,
        now: Instant,
    ) -> Option<&'a mut Entry> {
        if sessions.get(id).is_some_and(|entry| self.is_expired(entry, now)) {
            sessions.remove(id);
            debug!(session_id = %id, "Session expired");
            return None;
        }
        let entry = sessions.get_mut(id)?;
        entry.last_access = now;
        Some(entry)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn resolve_or_create(
        &self,
        requested: Option<&SessionId>,
        system_prompt: &str,
    ) -> Result<SessionResolution, SessionStoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        if let Some(id) = requested
            && let Some(entry) = self.live(&mut sessions, id, now)
        {
            entry.leases += 1;
            return Ok(SessionResolution {
                id: id.clone(),
                created: false,
            });
        }

        self.purge_expired(&mut sessions, now);
        if let Some(max) = self.max_sessions {
            while sessions.len() >= max && !sessions.is_empty() {
                if !Self::evict_lru(&mut sessions) {
                    warn!(
                        sessions = sessions.len(),
                        max, "All sessions are in use, exceeding the session cap"
                    );
                    break;
                }
            }
        }

        let id = SessionId::new(Uuid::new_v4().to_string());
        sessions.insert(
            id.clone(),
            Entry {
                session: Session::with_system_prompt(id.clone(), system_prompt),
                last_access: now,
                leases: 1,
            },
        );
        Ok(SessionResolution { id, created: true })
    }

    async fn release(&self, id: &SessionId) {
        let mut sessions = self.sessions.write().await;
        if let Some(entry) = sessions.get_mut(id) {
            entry.leases = entry.leases.saturating_sub(1);
            entry.last_access = Instant::now();
        }
    }

    async fn append(&self, id: &SessionId, turn: Turn) -> Result<(), SessionStoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = self
            .live(&mut sessions, id, now)
            .ok_or_else(|| SessionStoreError::NotFound(id.clone()))?;
        if entry.session.push(turn) {
            Ok(())
        } else {
            Err(SessionStoreError::MisplacedSystemTurn)
        }
    }

    async fn history(&self, id: &SessionId) -> Result<Vec<Turn>, SessionStoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.live(&mut sessions, id, now)
            .map(|entry| entry.session.turns().to_vec())
            .ok_or_else(|| SessionStoreError::NotFound(id.clone()))
    }

    async fn session_count(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|entry| !self.is_expired(entry, now))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genie_domain::Role;

    const SYSTEM: &str = "You are a gift assistant.";

    #[tokio::test]
    async fn test_new_session_has_single_system_turn() {
        let store = InMemorySessionStore::new();
        let resolved = store.resolve_or_create(None, SYSTEM).await.unwrap();
        assert!(resolved.created);
        assert!(Uuid::parse_str(resolved.id.as_str()).is_ok());

        let history = store.history(&resolved.id).await.unwrap();
        assert_eq!(history, vec![Turn::system(SYSTEM)]);
    }

    #[tokio::test]
    async fn test_known_id_is_reused_and_unknown_is_replaced() {
        let store = InMemorySessionStore::new();
        let first = store.resolve_or_create(None, SYSTEM).await.unwrap();

        let again = store
            .resolve_or_create(Some(&first.id), SYSTEM)
            .await
            .unwrap();
        assert_eq!(again, SessionResolution { id: first.id.clone(), created: false });

        let unknown = SessionId::from("not-a-session");
        let fresh = store.resolve_or_create(Some(&unknown), SYSTEM).await.unwrap();
        assert!(fresh.created);
        assert_ne!(fresh.id, unknown);
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_append_keeps_order_and_rejects_system_turns() {
        let store = InMemorySessionStore::new();
        let id = store.resolve_or_create(None, SYSTEM).await.unwrap().id;

        store.append(&id, Turn::user("gift for a cat lover")).await.unwrap();
        store.append(&id, Turn::assistant("1. Cat tree")).await.unwrap();
        store.append(&id, Turn::user("cheaper")).await.unwrap();
        assert_eq!(
            store.append(&id, Turn::system("again")).await,
            Err(SessionStoreError::MisplacedSystemTurn)
        );

        let roles: Vec<Role> = store
            .history(&id)
            .await
            .unwrap()
            .iter()
            .map(|t| t.role)
            .collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
    }

    #[tokio::test]
    async fn test_unknown_session_operations_fail() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("missing");
        assert_eq!(
            store.append(&id, Turn::user("hi")).await,
            Err(SessionStoreError::NotFound(id.clone()))
        );
        assert!(store.history(&id).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_expire() {
        let store = InMemorySessionStore::new().with_ttl(Some(Duration::from_secs(60)));
        let id = store.resolve_or_create(None, SYSTEM).await.unwrap().id;
        store.release(&id).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.history(&id).await.is_ok());

        // Access refreshed the clock.
        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.history(&id).await.is_ok());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(store.session_count().await, 0);
        let resolved = store.resolve_or_create(Some(&id), SYSTEM).await.unwrap();
        assert!(resolved.created);
        assert_ne!(resolved.id, id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cap_evicts_least_recently_used() {
        let store = InMemorySessionStore::new().with_max_sessions(Some(2));
        let a = store.resolve_or_create(None, SYSTEM).await.unwrap().id;
        store.release(&a).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        let b = store.resolve_or_create(None, SYSTEM).await.unwrap().id;
        store.release(&b).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        store.history(&a).await.unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;

        let c = store.resolve_or_create(None, SYSTEM).await.unwrap().id;
        assert_eq!(store.session_count().await, 2);
        assert!(store.history(&a).await.is_ok());
        assert!(store.history(&b).await.is_err());
        assert!(store.history(&c).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_leased_session_survives_cap_and_ttl() {
        let store = InMemorySessionStore::new()
            .with_ttl(Some(Duration::from_secs(60)))
            .with_max_sessions(Some(1));
        let a = store.resolve_or_create(None, SYSTEM).await.unwrap().id;
        store.append(&a, Turn::user("gift for a gardener")).await.unwrap();

        // A second request arrives while the first is still streaming.
        tokio::time::advance(Duration::from_secs(1)).await;
        let b = store.resolve_or_create(None, SYSTEM).await.unwrap().id;
        store.release(&b).await;
        assert_eq!(store.session_count().await, 2);

        tokio::time::advance(Duration::from_secs(120)).await;
        store.append(&a, Turn::assistant("1. Pruning shears")).await.unwrap();
        store.release(&a).await;
        let roles: Vec<Role> = store
            .history(&a)
            .await
            .unwrap()
            .iter()
            .map(|t| t.role)
            .collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);

        // Released sessions age and evict normally again.
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(store.session_count().await, 0);
        let c = store.resolve_or_create(None, SYSTEM).await.unwrap().id;
        assert!(store.history(&a).await.is_err());
        assert!(store.history(&c).await.is_ok());
    }
}
