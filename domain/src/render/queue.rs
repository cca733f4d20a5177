//! Render queue

use std::collections::VecDeque;

/// Ordered buffer of characters waiting to be revealed.
///
/// Counts every character that enters and leaves so the conservation rule
/// `enqueued == drained + discarded + len` can be checked at any time.
/// Draining works on `char`s, never splitting a UTF-8 sequence.
#[derive(Debug, Default, Clone)]
pub struct RenderQueue {
    pending: VecDeque<char>,
    enqueued: usize,
    drained: usize,
    discarded: usize,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, fragment: &str) {
        let before = self.pending.len();
        self.pending.extend(fragment.chars());
        self.enqueued += self.pending.len() - before;
    }

    /// Remove up to `count` characters from the front.
    pub fn drain(&mut self, count: usize) -> String {
        let take = count.min(self.pending.len());
        let chunk: String = self.pending.drain(..take).collect();
        self.drained += take;
        chunk
    }

    /// Remove everything.
    pub fn drain_all(&mut self) -> String {
        self.drain(self.pending.len())
    }

    /// Drop everything without revealing it. Returns how many characters were dropped.
    pub fn discard(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.discarded += dropped;
        dropped
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn enqueued(&self) -> usize {
        self.enqueued
    }

    pub fn drained(&self) -> usize {
        self.drained
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }
}
