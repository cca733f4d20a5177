//! Client parameters: pacing and progress for the ask flow.

use genie_domain::{PacingPolicy, ProgressCurve};
use std::time::Duration;

/// Parameters for [`AskGiftUseCase`](crate::use_cases::ask_gift::AskGiftUseCase).
#[derive(Debug, Clone, Default)]
pub struct ClientParams {
    pub pacing: PacingPolicy,
    pub progress: ProgressCurve,
}

impl ClientParams {
    /// Expected wait for the first token; the bar paces itself against it.
    pub fn with_progress_estimate(mut self, estimate: Option<Duration>) -> Self {
        if let Some(estimate) = estimate {
            self.progress = self.progress.with_estimate(estimate);
        }
        self
    }
}
