//! Progress indicator port
//!
//! The bar shown while waiting for the first token.

/// Callback for progress updates
///
/// Implementations live in the presentation layer.
pub trait ProgressIndicator: Send + Sync {
    /// Make the bar visible at 0 %.
    fn show(&self);

    /// Move the bar. `percent` is in `[0, 100]`.
    fn set_percent(&self, percent: f64);

    /// Hide the bar and reset it to 0 %.
    fn hide(&self);
}

/// No-op progress indicator for when progress reporting is not needed
pub struct NoProgress;

impl ProgressIndicator for NoProgress {
    fn show(&self) {}
    fn set_percent(&self, _percent: f64) {}
    fn hide(&self) {}
}
