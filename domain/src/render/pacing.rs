//! Reveal pacing policy

use std::time::Duration;

/// How many characters each tick reveals and how long to wait for the next.
///
/// Chunk size is a step function of the queue length: the further the
/// reveal falls behind arrival, the bigger the steps. The delay is a small
/// base plus jitter, shortened once the queue passes `fast_threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct PacingPolicy {
    /// `(queue longer than, chunk size)`, sorted by threshold descending.
    steps: Vec<(usize, usize)>,
    base_delay: Duration,
    jitter: Duration,
    fast_threshold: usize,
    fast_base_delay: Duration,
    fast_jitter: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            steps: vec![(200, 12), (80, 6), (20, 3)],
            base_delay: Duration::from_millis(12),
            jitter: Duration::from_millis(18),
            fast_threshold: 120,
            fast_base_delay: Duration::from_millis(4),
            fast_jitter: Duration::from_millis(6),
        }
    }
}

impl PacingPolicy {
    /// Characters to reveal on a tick; at least one.
    pub fn chunk_size(&self, queue_len: usize) -> usize {
        self.steps
            .iter()
            .find(|(threshold, _)| queue_len > *threshold)
            .map_or(1, |(_, size)| (*size).max(1))
    }

    /// Delay before the next tick. `roll` is a uniform sample from `[0, 1)`.
    pub fn delay(&self, queue_len: usize, roll: f64) -> Duration {
        let roll = roll.clamp(0.0, 1.0);
        let (base, jitter) = if queue_len > self.fast_threshold {
            (self.fast_base_delay, self.fast_jitter)
        } else {
            (self.base_delay, self.jitter)
        };
        base + jitter.mul_f64(roll)
    }
}
