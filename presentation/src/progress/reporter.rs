//! Progress bar shown while waiting for the first token

use genie_application::ProgressIndicator;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// Renders the pre-first-token progress as an indicatif bar on stderr.
pub struct ProgressBarIndicator {
    bar: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl ProgressBarIndicator {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: false,
        }
    }

    /// An indicator that tracks position without drawing anything.
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: true,
        }
    }

    /// Current position in percent, while the bar is visible.
    pub fn position(&self) -> Option<u64> {
        self.lock().as_ref().map(ProgressBar::position)
    }

    /// Run `write` with the bar cleared from the terminal, then redraw it.
    /// Output printed while the bar is visible must go through here.
    pub fn suspend<R>(&self, write: impl FnOnce() -> R) -> R {
        let bar = self.lock().clone();
        match bar {
            Some(pb) => pb.suspend(write),
            None => write(),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ProgressBarIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for ProgressBarIndicator {
    fn show(&self) {
        let pb = ProgressBar::new(100);
        if self.hidden {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.set_style(Self::style());
        pb.set_prefix("Thinking");
        pb.set_message("looking for gift ideas...");

        if let Some(previous) = self.lock().replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn set_percent(&self, percent: f64) {
        if let Some(pb) = self.lock().as_ref() {
            pb.set_position(percent.clamp(0.0, 100.0).round() as u64);
        }
    }

    fn hide(&self) {
        if let Some(pb) = self.lock().take() {
            pb.finish_and_clear();
        }
    }
}
