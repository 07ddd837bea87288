//! Bounded pointer history for trajectory gestures.

use std::collections::VecDeque;

use super::mapper::PointerSample;

/// Maximum number of samples retained.
pub const HISTORY_CAPACITY: usize = 20;

/// FIFO of the most recent pointer samples, oldest first.
#[derive(Debug, Clone)]
pub struct GestureHistory {
    samples: VecDeque<PointerSample>,
}

impl GestureHistory {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Append a sample, evicting the oldest once over capacity.
    pub fn push(&mut self, sample: PointerSample) {
        self.samples.push_back(sample);
        while self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PointerSample> {
        self.samples.iter()
    }

    /// Snapshot of the buffer, oldest first.
    pub fn as_sequence(&self) -> Vec<PointerSample> {
        self.samples.iter().copied().collect()
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<&PointerSample> {
        self.samples.back()
    }

    /// Sample `n` places from the end (`n = 1` is the most recent).
    pub fn nth_from_end(&self, n: usize) -> Option<&PointerSample> {
        if n == 0 || n > self.samples.len() {
            return None;
        }
        self.samples.get(self.samples.len() - n)
    }
}

impl Default for GestureHistory {
    fn default() -> Self {
        Self::new()
    }
}
