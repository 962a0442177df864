//! Scene configuration.

use std::time::Duration;

/// Smallest padding that still covers anti-aliased edges.
pub const MIN_CLEAR_PADDING: f32 = 1.0;

/// Configuration for a [`Scene`](super::Scene).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Padding added around the clear region, in pixels.
    ///
    /// Values below [`MIN_CLEAR_PADDING`] are treated as the minimum.
    pub clear_padding: f32,
    /// Number of frames in the rolling timing window.
    pub timing_samples: usize,
    /// Time budget for a single draw.
    pub frame_budget: Duration,
}

impl SceneConfig {
    /// Set the clear padding.
    #[must_use]
    pub const fn with_clear_padding(mut self, padding: f32) -> Self {
        self.clear_padding = padding;
        self
    }

    /// Set the rolling timing window.
    #[must_use]
    pub const fn with_timing_samples(mut self, samples: usize) -> Self {
        self.timing_samples = samples;
        self
    }

    /// Set the frame budget.
    #[must_use]
    pub const fn with_frame_budget(mut self, budget: Duration) -> Self {
        self.frame_budget = budget;
        self
    }

    /// Padding actually applied, never below [`MIN_CLEAR_PADDING`].
    #[inline]
    pub fn effective_padding(&self) -> f32 {
        if self.clear_padding.is_finite() {
            self.clear_padding.max(MIN_CLEAR_PADDING)
        } else {
            MIN_CLEAR_PADDING
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_padding: MIN_CLEAR_PADDING,
            timing_samples: 50,
            frame_budget: Duration::from_millis(16),
        }
    }
}
