//! Ask Gift use case.
//!
//! Client side of a gift request: sends the prompt to the relay, consumes
//! the event stream, and drives the render pacer, the progress ticker and
//! the [`RequestPhase`] state machine until the reply completes or fails.

use crate::config::ClientParams;
use crate::ports::markdown_renderer::MarkdownRenderer;
use crate::ports::progress::ProgressIndicator;
use crate::ports::relay_client::{ClientError, RelayClient};
use crate::ports::render_surface::RenderSurface;
use crate::ports::session_id_store::SessionIdStore;
use crate::use_cases::consume_stream::relay_events;
use crate::use_cases::progress_ticker::ProgressTicker;
use crate::use_cases::render_pacer::{Jitter, RandomJitter, RenderPacer};
use futures::StreamExt;
use genie_domain::util::preview;
use genie_domain::{GiftPrompt, LifecycleError, RelayEvent, RequestPhase, SessionId};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Shown in place of the reply when a request fails.
pub const APOLOGY: &str = "Sorry, I can't access what I need right now. Please try again in a bit.";

/// Result of one request that reached the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Completed { text: String },
    Failed { error: ClientError },
}

impl AskOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, AskOutcome::Completed { .. })
    }
}

pub struct AskGiftUseCase {
    client: Arc<dyn RelayClient>,
    session_ids: Arc<dyn SessionIdStore>,
    renderer: Arc<dyn MarkdownRenderer>,
    surface: Arc<dyn RenderSurface>,
    progress: Arc<dyn ProgressIndicator>,
    jitter: Arc<dyn Jitter>,
    params: ClientParams,
    phase: Mutex<RequestPhase>,
}

impl AskGiftUseCase {
    pub fn new(
        client: Arc<dyn RelayClient>,
        session_ids: Arc<dyn SessionIdStore>,
        renderer: Arc<dyn MarkdownRenderer>,
        surface: Arc<dyn RenderSurface>,
        progress: Arc<dyn ProgressIndicator>,
    ) -> Self {
        Self {
            client,
            session_ids,
            renderer,
            surface,
            progress,
            jitter: Arc::new(RandomJitter),
            params: ClientParams::default(),
            phase: Mutex::new(RequestPhase::Idle),
        }
    }

    pub fn with_params(mut self, params: ClientParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn Jitter>) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn phase(&self) -> RequestPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_ids.load()
    }

    /// Forget the conversation and return to `idle`.
    pub fn reset(&self) -> Result<(), ClientError> {
        self.session_ids.clear()?;
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = RequestPhase::Idle;
        self.surface.clear();
        info!("Conversation reset");
        Ok(())
    }

    /// Run one request.
    ///
    /// Empty prompts are rejected with `InvalidInput` before anything is
    /// sent; a request while another is in flight is a `Lifecycle` error.
    /// Everything after submission ends in an [`AskOutcome`].
    pub async fn execute(&self, prompt: &str) -> Result<AskOutcome, ClientError> {
        let prompt = GiftPrompt::try_new(prompt.trim())?;
        self.advance(RequestPhase::Submitting)?;
        let _in_flight = InFlight { phase: &self.phase };
        info!("Asking: {}", preview(prompt.content(), 100));

        self.surface.clear();
        let ticker = ProgressTicker::start(self.params.progress.clone(), self.progress.clone());
        let pacer = RenderPacer::spawn(
            self.params.pacing.clone(),
            self.renderer.clone(),
            self.surface.clone(),
            self.jitter.clone(),
        );

        let result = self.stream_reply(&prompt, &pacer, &ticker).await;
        ticker.finish();

        match result {
            Ok(text) => {
                self.advance(RequestPhase::Completed)?;
                info!(chars = text.chars().count(), "Reply complete");
                Ok(AskOutcome::Completed { text })
            }
            Err(ClientError::Lifecycle(e)) => {
                pacer.cancel();
                Err(ClientError::Lifecycle(e))
            }
            Err(error) => {
                if let ClientError::ProviderError(_) = error {
                    // Keep what already arrived on screen under the apology.
                    pacer.flush().await;
                } else {
                    pacer.cancel();
                }
                match error.displayed_detail() {
                    Some(detail) => warn!("Provider error: {}", detail),
                    None => warn!("Request failed: {}", error),
                }
                self.surface.show_apology(error.displayed_detail());
                self.advance(RequestPhase::Errored)?;
                Ok(AskOutcome::Failed { error })
            }
        }
    }

    async fn stream_reply(
        &self,
        prompt: &GiftPrompt,
        pacer: &RenderPacer,
        ticker: &ProgressTicker,
    ) -> Result<String, ClientError> {
        let session_id = self.session_ids.load();
        debug!(resumed = session_id.is_some(), "Opening relay stream");

        let body = self.client.open(prompt, session_id.as_ref()).await?;
        self.advance(RequestPhase::AwaitingFirstToken)?;

        let mut events = relay_events(body);
        while let Some(item) = events.next().await {
            match item? {
                RelayEvent::SessionId(id) => {
                    if session_id.as_ref() != Some(&id) {
                        debug!(session_id = %id, "Storing session id");
                    }
                    if let Err(e) = self.session_ids.save(&id) {
                        warn!("Could not persist session id: {}", e);
                    }
                }
                RelayEvent::Content(fragment) => {
                    if self.phase() == RequestPhase::AwaitingFirstToken {
                        self.advance(RequestPhase::Streaming)?;
                        ticker.finish();
                    }
                    pacer.enqueue(fragment);
                }
                RelayEvent::Done => {
                    return pacer
                        .flush()
                        .await
                        .ok_or_else(|| ClientError::NetworkError("render pacer stopped".into()));
                }
                RelayEvent::Error(message) => return Err(ClientError::ProviderError(message)),
            }
        }
        Err(ClientError::stream_ended())
    }

    fn advance(&self, to: RequestPhase) -> Result<(), LifecycleError> {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        let next = phase.transition(to)?;
        *phase = next;
        debug!(phase = %next, "Request phase");
        Ok(())
    }
}

/// Marks a request dropped before it settled as `errored`, so the next
/// prompt is accepted.
struct InFlight<'a> {
    phase: &'a Mutex<RequestPhase>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        if phase.is_in_flight() {
            let abandoned = *phase;
            *phase = RequestPhase::Errored;
            warn!(phase = %abandoned, "Request abandoned in flight");
        }
    }
}
