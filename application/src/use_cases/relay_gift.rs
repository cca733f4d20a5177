//! Relay Gift use case.
//!
//! Server side of a gift request: validates the prompt, resolves the
//! session, then streams the provider reply to the client as
//! [`RelayEvent`]s while accumulating it for the session history.

use crate::config::RelayParams;
use crate::ports::chat_gateway::{ChatGateway, StreamHandle};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::session_store::{SessionStore, SessionStoreError};
use genie_domain::util::preview;
use genie_domain::{
    DomainError, GiftPrompt, GiftPromptTemplate, RelayEvent, SessionId, StreamEvent, Turn,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Errors reported before the event stream opens.
///
/// Once the stream is open every failure travels in-band as
/// [`RelayEvent::Error`].
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0}")]
    InvalidInput(DomainError),

    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
}

/// Input for the [`RelayGiftUseCase`].
#[derive(Debug, Clone, Default)]
pub struct RelayGiftInput {
    pub user_prompt: Option<String>,
    pub session_id: Option<String>,
}

impl RelayGiftInput {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: Some(user_prompt.into()),
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// An open relay. `events` starts with the session id and ends with
/// `Done` or `Error`.
pub struct RelayStream {
    pub session_id: SessionId,
    pub created: bool,
    pub events: mpsc::Receiver<RelayEvent>,
}

/// How a relay task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Completed { reply: String },
    Failed { message: String },
    Abandoned,
}

pub struct RelayGiftUseCase {
    gateway: Arc<dyn ChatGateway>,
    sessions: Arc<dyn SessionStore>,
    template: GiftPromptTemplate,
    params: RelayParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for RelayGiftUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            sessions: self.sessions.clone(),
            template: self.template,
            params: self.params.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl RelayGiftUseCase {
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
        sessions: Arc<dyn SessionStore>,
        params: RelayParams,
    ) -> Self {
        Self {
            gateway,
            sessions,
            template: GiftPromptTemplate::new(params.where_to_buy),
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn model(&self) -> &str {
        self.gateway.model().as_str()
    }

    /// Validate, record the user turn and open the event stream.
    ///
    /// The provider call runs on a spawned task; the returned stream is fed
    /// until the reply completes, fails, or the receiver is dropped. The
    /// session stays leased until that task has committed the reply.
    pub async fn execute(&self, input: RelayGiftInput) -> Result<RelayStream, RelayError> {
        let prompt = GiftPrompt::from_optional(input.user_prompt).map_err(RelayError::InvalidInput)?;
        let requested = input
            .session_id
            .filter(|id| !id.trim().is_empty())
            .map(SessionId::new);

        let resolution = self
            .sessions
            .resolve_or_create(requested.as_ref(), &self.template.system_prompt())
            .await?;
        let session_id = resolution.id;
        if resolution.created {
            info!(session_id = %session_id, "Created session");
        } else {
            debug!(session_id = %session_id, "Resuming session");
        }

        let history = match self.open_turn(&session_id, &prompt).await {
            Ok(history) => history,
            Err(e) => {
                self.sessions.release(&session_id).await;
                return Err(e.into());
            }
        };

        info!(
            session_id = %session_id,
            turns = history.len(),
            "Relaying prompt: {}",
            preview(prompt.content(), 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "relay_started",
            json!({
                "session_id": session_id.as_str(),
                "created": resolution.created,
                "model": self.model(),
                "prompt": prompt.content(),
                "turns": history.len(),
            }),
        ));

        let (tx, rx) = mpsc::channel(self.params.channel_capacity.max(1));
        let task = RelayTask {
            gateway: self.gateway.clone(),
            sessions: self.sessions.clone(),
            conversation_logger: self.conversation_logger.clone(),
            session_id: session_id.clone(),
            tx,
        };
        tokio::spawn(task.run(history));

        Ok(RelayStream {
            session_id,
            created: resolution.created,
            events: rx,
        })
    }

    async fn open_turn(
        &self,
        session_id: &SessionId,
        prompt: &GiftPrompt,
    ) -> Result<Vec<Turn>, SessionStoreError> {
        self.sessions
            .append(session_id, Turn::user(prompt.content()))
            .await?;
        self.sessions.history(session_id).await
    }
}

struct RelayTask {
    gateway: Arc<dyn ChatGateway>,
    sessions: Arc<dyn SessionStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
    session_id: SessionId,
    tx: mpsc::Sender<RelayEvent>,
}

impl RelayTask {
    async fn run(self, history: Vec<Turn>) -> RelayOutcome {
        let outcome = self.forward(history).await;
        self.record(&outcome);
        self.sessions.release(&self.session_id).await;
        outcome
    }

    async fn forward(&self, history: Vec<Turn>) -> RelayOutcome {
        if self
            .tx
            .send(RelayEvent::SessionId(self.session_id.clone()))
            .await
            .is_err()
        {
            return RelayOutcome::Abandoned;
        }

        let handle = tokio::select! {
            _ = self.tx.closed() => return RelayOutcome::Abandoned,
            result = self.gateway.stream_chat(&history) => result,
        };
        let handle = match handle {
            Ok(handle) => handle,
            Err(e) => return self.fail(e.to_string()).await,
        };

        let reply = match self.pump(handle).await {
            Ok(reply) => reply,
            Err(outcome) => return outcome,
        };

        if self.tx.send(RelayEvent::Done).await.is_err() {
            return RelayOutcome::Abandoned;
        }
        if let Err(e) = self
            .sessions
            .append(&self.session_id, Turn::assistant(reply.clone()))
            .await
        {
            error!(session_id = %self.session_id, "Failed to commit reply: {}", e);
        }
        RelayOutcome::Completed { reply }
    }

    /// Forward deltas until the provider completes. `Err` carries the
    /// terminal outcome when the stream did not complete.
    async fn pump(&self, mut handle: StreamHandle) -> Result<String, RelayOutcome> {
        let mut reply = String::new();
        loop {
            // Dropping `handle` on return aborts the provider read.
            let event = tokio::select! {
                _ = self.tx.closed() => return Err(RelayOutcome::Abandoned),
                event = handle.receiver.recv() => event,
            };
            match event {
                Some(StreamEvent::Delta(fragment)) => {
                    if fragment.is_empty() {
                        continue;
                    }
                    reply.push_str(&fragment);
                    if self.tx.send(RelayEvent::Content(fragment)).await.is_err() {
                        return Err(RelayOutcome::Abandoned);
                    }
                }
                Some(StreamEvent::Completed(full_text)) => {
                    if reply.is_empty() && !full_text.is_empty() {
                        if self
                            .tx
                            .send(RelayEvent::Content(full_text.clone()))
                            .await
                            .is_err()
                        {
                            return Err(RelayOutcome::Abandoned);
                        }
                        reply = full_text;
                    }
                    return Ok(reply);
                }
                Some(StreamEvent::Error(message)) => return Err(self.fail(message).await),
                None => {
                    return Err(self
                        .fail("Provider stream closed before completion".to_string())
                        .await);
                }
            }
        }
    }

    async fn fail(&self, message: String) -> RelayOutcome {
        if self.tx.send(RelayEvent::Error(message.clone())).await.is_err() {
            return RelayOutcome::Abandoned;
        }
        RelayOutcome::Failed { message }
    }

    fn record(&self, outcome: &RelayOutcome) {
        let session_id = self.session_id.as_str();
        let event = match outcome {
            RelayOutcome::Completed { reply } => {
                info!(session_id, chars = reply.chars().count(), "Relay completed");
                ConversationEvent::new(
                    "relay_completed",
                    json!({ "session_id": session_id, "reply": reply }),
                )
            }
            RelayOutcome::Failed { message } => {
                error!(session_id, "Provider failed: {}", message);
                ConversationEvent::new(
                    "relay_failed",
                    json!({ "session_id": session_id, "error": message }),
                )
            }
            RelayOutcome::Abandoned => {
                warn!(session_id, "Client disconnected, relay abandoned");
                ConversationEvent::new("relay_abandoned", json!({ "session_id": session_id }))
            }
        };
        self.conversation_logger.log(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::GatewayError;
    use crate::ports::session_store::SessionResolution;
    use async_trait::async_trait;
    use genie_domain::{ModelId, Role};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    // ==================== Test Fakes ====================

    /// Gateway that replays a scripted event list and records what it was sent.
    struct ScriptedGateway {
        model: ModelId,
        script: Mutex<Vec<StreamEvent>>,
        open_error: Option<GatewayError>,
        received: Mutex<Vec<Vec<Turn>>>,
        /// Keeps the provider side open after the script so abandonment can be observed.
        hold_open: bool,
        held: Mutex<Vec<mpsc::Sender<StreamEvent>>>,
    }

    impl ScriptedGateway {
        fn new(script: Vec<StreamEvent>) -> Self {
            Self {
                model: ModelId::default(),
                script: Mutex::new(script),
                open_error: None,
                received: Mutex::new(Vec::new()),
                hold_open: false,
                held: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: GatewayError) -> Self {
            let mut gateway = Self::new(vec![]);
            gateway.open_error = Some(error);
            gateway
        }

        fn held_open(script: Vec<StreamEvent>) -> Self {
            let mut gateway = Self::new(script);
            gateway.hold_open = true;
            gateway
        }

        fn calls(&self) -> Vec<Vec<Turn>> {
            self.received.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatGateway for ScriptedGateway {
        fn model(&self) -> &ModelId {
            &self.model
        }

        async fn stream_chat(&self, turns: &[Turn]) -> Result<StreamHandle, GatewayError> {
            self.received.lock().unwrap().push(turns.to_vec());
            if let Some(e) = &self.open_error {
                return Err(e.clone());
            }
            let events = std::mem::take(&mut *self.script.lock().unwrap());
            let (tx, rx) = mpsc::channel(events.len() + 1);
            for event in events {
                tx.try_send(event).unwrap();
            }
            if self.hold_open {
                self.held.lock().unwrap().push(tx);
            }
            Ok(StreamHandle::new(rx))
        }
    }

    #[derive(Default)]
    struct FakeSessionStore {
        sessions: RwLock<HashMap<SessionId, Vec<Turn>>>,
        minted: Mutex<usize>,
        leases: Mutex<HashMap<SessionId, usize>>,
        /// Fail every append with `Unavailable`.
        broken: bool,
    }

    impl FakeSessionStore {
        async fn turns(&self, id: &SessionId) -> Vec<Turn> {
            self.sessions.read().await.get(id).cloned().unwrap_or_default()
        }

        fn leases(&self, id: &SessionId) -> usize {
            self.leases.lock().unwrap().get(id).copied().unwrap_or_default()
        }

        fn lease(&self, id: &SessionId) {
            *self.leases.lock().unwrap().entry(id.clone()).or_default() += 1;
        }
    }

    #[async_trait]
    impl SessionStore for FakeSessionStore {
        async fn resolve_or_create(
            &self,
            requested: Option<&SessionId>,
            system_prompt: &str,
        ) -> Result<SessionResolution, SessionStoreError> {
            let mut sessions = self.sessions.write().await;
            if let Some(id) = requested.filter(|id| sessions.contains_key(*id)) {
                self.lease(id);
                return Ok(SessionResolution {
                    id: id.clone(),
                    created: false,
                });
            }
            let mut minted = self.minted.lock().unwrap();
            *minted += 1;
            let id = SessionId::new(format!("session-{minted}"));
            sessions.insert(id.clone(), vec![Turn::system(system_prompt)]);
            self.lease(&id);
            Ok(SessionResolution { id, created: true })
        }

        async fn release(&self, id: &SessionId) {
            if let Some(count) = self.leases.lock().unwrap().get_mut(id) {
                *count = count.saturating_sub(1);
            }
        }

        async fn append(&self, id: &SessionId, turn: Turn) -> Result<(), SessionStoreError> {
            if self.broken {
                return Err(SessionStoreError::Unavailable("disk full".into()));
            }
            self.sessions
                .write()
                .await
                .get_mut(id)
                .ok_or_else(|| SessionStoreError::NotFound(id.clone()))?
                .push(turn);
            Ok(())
        }

        async fn history(&self, id: &SessionId) -> Result<Vec<Turn>, SessionStoreError> {
            self.sessions
                .read()
                .await
                .get(id)
                .cloned()
                .ok_or_else(|| SessionStoreError::NotFound(id.clone()))
        }

        async fn session_count(&self) -> usize {
            self.sessions.read().await.len()
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn use_case(
        gateway: Arc<ScriptedGateway>,
        store: Arc<FakeSessionStore>,
    ) -> RelayGiftUseCase {
        RelayGiftUseCase::new(gateway, store, RelayParams::default())
    }

    async fn drain(mut events: mpsc::Receiver<RelayEvent>) -> Vec<RelayEvent> {
        let mut out = Vec::new();
        while let Some(event) = events.recv().await {
            out.push(event);
        }
        out
    }

    fn deltas(parts: &[&str]) -> Vec<StreamEvent> {
        let mut events: Vec<StreamEvent> =
            parts.iter().map(|p| StreamEvent::Delta(p.to_string())).collect();
        events.push(StreamEvent::Completed(parts.concat()));
        events
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_empty_prompt_never_reaches_provider() {
        let gateway = Arc::new(ScriptedGateway::new(deltas(&["x"])));
        let store = Arc::new(FakeSessionStore::default());
        let relay = use_case(gateway.clone(), store.clone());

        for input in [
            RelayGiftInput::default(),
            RelayGiftInput::new(""),
            RelayGiftInput::new("  \n\t"),
        ] {
            let err = relay.execute(input).await.err().unwrap();
            assert!(matches!(err, RelayError::InvalidInput(DomainError::InvalidInput)));
            assert_eq!(err.to_string(), "No userPrompt");
        }
        assert!(gateway.calls().is_empty());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_new_session_streams_and_commits() {
        let parts = ["1. **Cat", " tree**", " - ", "", "€18\n2. Laser toy"];
        let gateway = Arc::new(ScriptedGateway::new(deltas(&parts)));
        let store = Arc::new(FakeSessionStore::default());
        let relay = use_case(gateway.clone(), store.clone());

        let stream = relay
            .execute(RelayGiftInput::new("birthday gift for a cat lover, budget 20"))
            .await
            .unwrap();
        assert!(stream.created);
        let id = stream.session_id.clone();
        let events = drain(stream.events).await;

        assert_eq!(events.first(), Some(&RelayEvent::SessionId(id.clone())));
        assert_eq!(events.last(), Some(&RelayEvent::Done));
        let content: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                RelayEvent::Content(c) => Some(c.as_str()),
                _ => None,
            })
            .collect();
        // Empty fragments are not forwarded
        assert_eq!(content.len(), 4);

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        let roles: Vec<Role> = calls[0].iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);

        let turns = store.turns(&id).await;
        let roles: Vec<Role> = turns.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(turns[2].content, content.concat());
        assert_eq!(store.leases(&id), 0);
    }

    #[tokio::test]
    async fn test_follow_up_reuses_history() {
        let gateway = Arc::new(ScriptedGateway::new(deltas(&["Mug"])));
        let store = Arc::new(FakeSessionStore::default());
        let relay = use_case(gateway.clone(), store.clone());

        let first = relay.execute(RelayGiftInput::new("gift for dad")).await.unwrap();
        let id = first.session_id.clone();
        drain(first.events).await;

        *gateway.script.lock().unwrap() = deltas(&["Socks"]);
        let second = relay
            .execute(RelayGiftInput::new("cheaper please").with_session_id(id.as_str()))
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.session_id, id);
        drain(second.events).await;

        let calls = gateway.calls();
        let roles: Vec<Role> = calls[1].iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(store.turns(&id).await.len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_session_id_gets_fresh_session() {
        let gateway = Arc::new(ScriptedGateway::new(deltas(&["ok"])));
        let store = Arc::new(FakeSessionStore::default());
        let relay = use_case(gateway.clone(), store.clone());

        let stream = relay
            .execute(RelayGiftInput::new("hi").with_session_id("stale-id"))
            .await
            .unwrap();
        assert!(stream.created);
        assert_ne!(stream.session_id.as_str(), "stale-id");
        drain(stream.events).await;

        let roles: Vec<Role> = gateway.calls()[0].iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
    }

    #[tokio::test]
    async fn test_mid_stream_failure_records_no_reply() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            StreamEvent::Delta("1. Book".into()),
            StreamEvent::Delta("\n2. Pen".into()),
            StreamEvent::Error("rate limited".into()),
        ]));
        let store = Arc::new(FakeSessionStore::default());
        let logger = Arc::new(RecordingLogger::default());
        let relay = use_case(gateway, store.clone()).with_conversation_logger(logger.clone());

        let stream = relay.execute(RelayGiftInput::new("gift")).await.unwrap();
        let id = stream.session_id.clone();
        let events = drain(stream.events).await;

        assert_eq!(
            events[1..],
            [
                RelayEvent::Content("1. Book".into()),
                RelayEvent::Content("\n2. Pen".into()),
                RelayEvent::Error("rate limited".into()),
            ]
        );
        let roles: Vec<Role> = store.turns(&id).await.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
        assert_eq!(store.leases(&id), 0);
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["relay_started", "relay_failed"]
        );
    }

    #[tokio::test]
    async fn test_gateway_open_failure_is_in_band() {
        let gateway = Arc::new(ScriptedGateway::failing(GatewayError::ProviderStatus {
            status: 401,
            body: "bad key".into(),
        }));
        let store = Arc::new(FakeSessionStore::default());
        let relay = use_case(gateway, store);

        let stream = relay.execute(RelayGiftInput::new("gift")).await.unwrap();
        let events = drain(stream.events).await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], RelayEvent::SessionId(_)));
        assert_eq!(
            events[1],
            RelayEvent::Error("Provider returned 401: bad key".into())
        );
    }

    #[tokio::test]
    async fn test_provider_closing_early_is_an_error() {
        let gateway = Arc::new(ScriptedGateway::new(vec![StreamEvent::Delta("half".into())]));
        let store = Arc::new(FakeSessionStore::default());
        let relay = use_case(gateway, store.clone());

        let stream = relay.execute(RelayGiftInput::new("gift")).await.unwrap();
        let id = stream.session_id.clone();
        let events = drain(stream.events).await;
        assert!(matches!(events.last(), Some(RelayEvent::Error(_))));
        assert!(!events.contains(&RelayEvent::Done));
        assert_eq!(store.turns(&id).await.len(), 2);
    }

    #[tokio::test]
    async fn test_completed_without_deltas_forwards_full_text() {
        let gateway = Arc::new(ScriptedGateway::new(vec![StreamEvent::Completed(
            "All at once".into(),
        )]));
        let store = Arc::new(FakeSessionStore::default());
        let relay = use_case(gateway, store.clone());

        let stream = relay.execute(RelayGiftInput::new("gift")).await.unwrap();
        let id = stream.session_id.clone();
        let events = drain(stream.events).await;
        assert_eq!(events[1], RelayEvent::Content("All at once".into()));
        assert_eq!(events[2], RelayEvent::Done);
        assert_eq!(store.turns(&id).await[2].content, "All at once");
    }

    #[tokio::test]
    async fn test_client_disconnect_abandons_relay() {
        let gateway = Arc::new(ScriptedGateway::held_open(vec![StreamEvent::Delta(
            "partial".into(),
        )]));
        let store = Arc::new(FakeSessionStore::default());
        let logger = Arc::new(RecordingLogger::default());
        let relay =
            use_case(gateway.clone(), store.clone()).with_conversation_logger(logger.clone());

        let mut stream = relay.execute(RelayGiftInput::new("gift")).await.unwrap();
        let id = stream.session_id.clone();
        assert!(matches!(stream.events.recv().await, Some(RelayEvent::SessionId(_))));
        assert_eq!(
            stream.events.recv().await,
            Some(RelayEvent::Content("partial".into()))
        );
        drop(stream.events);

        // The provider side observes the dropped handle once the task exits.
        let provider = gateway.held.lock().unwrap().pop().unwrap();
        provider.closed().await;

        assert_eq!(store.turns(&id).await.len(), 2);
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["relay_started", "relay_abandoned"]
        );
    }

    #[tokio::test]
    async fn test_session_stays_leased_until_reply_is_committed() {
        let gateway = Arc::new(ScriptedGateway::held_open(vec![StreamEvent::Delta(
            "1. Kite".into(),
        )]));
        let store = Arc::new(FakeSessionStore::default());
        let relay = use_case(gateway.clone(), store.clone());

        let mut stream = relay.execute(RelayGiftInput::new("gift")).await.unwrap();
        let id = stream.session_id.clone();
        assert!(matches!(stream.events.recv().await, Some(RelayEvent::SessionId(_))));
        assert_eq!(
            stream.events.recv().await,
            Some(RelayEvent::Content("1. Kite".into()))
        );
        assert_eq!(store.leases(&id), 1);

        let provider = gateway.held.lock().unwrap().pop().unwrap();
        provider
            .send(StreamEvent::Completed("1. Kite".into()))
            .await
            .unwrap();
        drop(provider);
        let rest = drain(stream.events).await;
        assert_eq!(rest, vec![RelayEvent::Done]);

        assert_eq!(store.turns(&id).await[2].content, "1. Kite");
        assert_eq!(store.leases(&id), 0);
    }

    #[tokio::test]
    async fn test_store_failure_before_streaming_releases_lease() {
        let gateway = Arc::new(ScriptedGateway::new(deltas(&["x"])));
        let store = Arc::new(FakeSessionStore {
            broken: true,
            ..Default::default()
        });
        let relay = use_case(gateway.clone(), store.clone());

        let err = relay.execute(RelayGiftInput::new("gift")).await.err().unwrap();
        assert!(matches!(
            err,
            RelayError::SessionStore(SessionStoreError::Unavailable(_))
        ));
        assert_eq!(store.leases(&SessionId::from("session-1")), 0);
        assert!(gateway.calls().is_empty());
    }
}
