//! Frame timer: Rolling average of draw durations.

use std::time::Duration;

/// Ring buffer of recent frame durations.
///
/// The average only counts samples actually recorded, so the first few
/// frames are not diluted by an empty window.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    /// Recorded durations, oldest overwritten first.
    samples: Vec<Duration>,
    /// Window size.
    capacity: usize,
    /// Slot the next sample goes into.
    cursor: usize,
    /// Budget a frame is measured against.
    budget: Duration,
}

impl FrameTimer {
    /// Create a timer keeping the last `capacity` frames (at least one).
    pub fn new(capacity: usize, budget: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
            budget,
        }
    }

    /// Record one frame.
    pub fn record(&mut self, elapsed: Duration) {
        if self.samples.len() < self.capacity {
            self.samples.push(elapsed);
        } else {
            self.samples[self.cursor] = elapsed;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Mean of the recorded frames, zero if none.
    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    /// Average as a percentage of the frame budget.
    pub fn budget_cost(&self) -> f64 {
        if self.budget.is_zero() {
            return 0.0;
        }
        self.average().as_secs_f64() / self.budget.as_secs_f64() * 100.0
    }

    /// Number of samples currently in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Frame budget.
    #[inline]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Forget all samples.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.cursor = 0;
    }
}
