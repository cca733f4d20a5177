//! Progress ticker actor.
//!
//! Drives a [`ProgressIndicator`] along a [`ProgressCurve`] while the client
//! waits for the first token. Runs on its own task so it never holds up the
//! render pacer.

use crate::ports::progress::ProgressIndicator;
use genie_domain::ProgressCurve;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tokio_util::sync::CancellationToken;

/// Handle to a running ticker. Dropping it before [`ProgressTicker::finish`]
/// hides the indicator at once; after it, the grace delay still runs out.
pub struct ProgressTicker {
    done: CancellationToken,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ProgressTicker {
    /// Show the indicator and start ticking.
    pub fn start(curve: ProgressCurve, indicator: Arc<dyn ProgressIndicator>) -> Self {
        let done = CancellationToken::new();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(curve, indicator, done.clone(), cancel.clone()));
        Self { done, cancel, task }
    }

    /// Drive the bar to 100 % and hide it after the grace delay. Idempotent.
    pub fn finish(&self) {
        self.done.cancel();
    }

    /// Hide the bar at once.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.done.is_cancelled() || self.cancel.is_cancelled()
    }

    /// Wait until the indicator is hidden.
    pub async fn wait(mut self) {
        let _ = (&mut self.task).await;
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        if !self.done.is_cancelled() {
            self.cancel.cancel();
        }
    }
}

async fn run(
    curve: ProgressCurve,
    indicator: Arc<dyn ProgressIndicator>,
    done: CancellationToken,
    cancel: CancellationToken,
) {
    let started = Instant::now();
    indicator.show();

    let mut ticks = interval_at(started + curve.tick, curve.tick);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                indicator.hide();
                return;
            }
            _ = done.cancelled() => break,
            _ = ticks.tick() => indicator.set_percent(curve.percent(started.elapsed())),
        }
    }

    indicator.set_percent(100.0);
    tokio::select! {
        _ = cancel.cancelled() => {}
        _ = sleep(curve.grace) => {}
    }
    indicator.hide();
}
