//! Render pacer actor.
//!
//! Reveals buffered reply text at a self-adjusting pace, independent of how
//! fast fragments arrive. One task owns the [`RenderQueue`] and the revealed
//! buffer; [`RenderPacer`] handles send it commands.
//!
//! Each tick takes [`PacingPolicy::chunk_size`] characters off the queue,
//! re-renders the whole revealed buffer and schedules the next tick. The
//! loop idles when the queue is empty and restarts on the next enqueue.

use crate::ports::markdown_renderer::MarkdownRenderer;
use crate::ports::render_surface::{RenderSurface, RenderedDocument};
use genie_domain::{PacingPolicy, RenderQueue};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::trace;

/// Source of jitter samples in `[0, 1)`.
pub trait Jitter: Send + Sync {
    fn roll(&self) -> f64;
}

/// Uniform jitter from the thread-local RNG.
pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn roll(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Always returns the same sample.
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn roll(&self) -> f64 {
        self.0
    }
}

enum PacerCommand {
    Enqueue(String),
    Flush(oneshot::Sender<String>),
}

/// Handle to a running pacer. Dropping the last handle cancels it.
#[derive(Clone)]
pub struct RenderPacer {
    commands: mpsc::UnboundedSender<PacerCommand>,
    cancel: CancellationToken,
    _stop: Arc<DropGuard>,
}

impl RenderPacer {
    /// Spawn the pacer task on the current runtime.
    pub fn spawn(
        policy: PacingPolicy,
        renderer: Arc<dyn MarkdownRenderer>,
        surface: Arc<dyn RenderSurface>,
        jitter: Arc<dyn Jitter>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let actor = PacerActor {
            queue: RenderQueue::new(),
            revealed: String::new(),
            next_tick: None,
            policy,
            renderer,
            surface,
            jitter,
        };
        tokio::spawn(actor.run(rx, cancel.clone()));
        Self {
            commands: tx,
            _stop: Arc::new(cancel.clone().drop_guard()),
            cancel,
        }
    }

    /// Queue a fragment for reveal. Ignored once the pacer is cancelled.
    pub fn enqueue(&self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if fragment.is_empty() || self.cancel.is_cancelled() {
            return;
        }
        let _ = self.commands.send(PacerCommand::Enqueue(fragment));
    }

    /// Reveal everything still queued with a single render and return the
    /// full text. `None` when the pacer has been cancelled.
    pub async fn flush(&self) -> Option<String> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let (tx, rx) = oneshot::channel();
        self.commands.send(PacerCommand::Flush(tx)).ok()?;
        rx.await.ok()
    }

    /// Stop pacing and drop queued text without rendering it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

struct PacerActor {
    queue: RenderQueue,
    revealed: String,
    /// `None` while idle.
    next_tick: Option<Instant>,
    policy: PacingPolicy,
    renderer: Arc<dyn MarkdownRenderer>,
    surface: Arc<dyn RenderSurface>,
    jitter: Arc<dyn Jitter>,
}

impl PacerActor {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<PacerCommand>,
        cancel: CancellationToken,
    ) {
        loop {
            let next_tick = self.next_tick;
            let tick = async move {
                match next_tick {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    let dropped = self.queue.discard();
                    trace!(dropped, "Pacer cancelled");
                    break;
                }
                command = commands.recv() => match command {
                    Some(PacerCommand::Enqueue(fragment)) => self.enqueue(&fragment),
                    Some(PacerCommand::Flush(reply)) => {
                        self.flush();
                        let _ = reply.send(self.revealed.clone());
                    }
                    None => break,
                },
                _ = tick => self.tick(),
            }
        }
    }

    fn enqueue(&mut self, fragment: &str) {
        self.queue.enqueue(fragment);
        if self.next_tick.is_none() {
            self.next_tick = Some(Instant::now());
        }
    }

    fn tick(&mut self) {
        let size = self.policy.chunk_size(self.queue.len());
        let chunk = self.queue.drain(size);
        self.revealed.push_str(&chunk);
        self.render();

        self.next_tick = if self.queue.is_empty() {
            None
        } else {
            let delay = self.policy.delay(self.queue.len(), self.jitter.roll());
            Some(Instant::now() + delay)
        };
    }

    fn flush(&mut self) {
        self.next_tick = None;
        let rest = self.queue.drain_all();
        self.revealed.push_str(&rest);
        self.render();
        debug_assert_eq!(self.queue.enqueued(), self.queue.drained());
    }

    fn render(&self) {
        let document = RenderedDocument {
            html: self.renderer.render(&self.revealed),
            markdown: self.revealed.clone(),
        };
        self.surface.show_document(&document);
    }
}
