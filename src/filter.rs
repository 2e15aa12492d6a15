//! Moving-average smoothing of temperature samples.

/// Window depth used by the regulator.
pub const FILTER_DEPTH: usize = 9;

/// Fixed-depth moving average over the most recent `N` samples.
///
/// During warm-up the mean covers only the samples seen so far; the window is
/// never zero padded.
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    window: heapless::Deque<f32, N>,
}

impl<const N: usize> MovingAverage<N> {
    /// Create empty filter.
    pub const fn new() -> Self {
        Self {
            window: heapless::Deque::new(),
        }
    }

    /// Push a sample and return the mean of the current window.
    pub fn filter(&mut self, sample: f32) -> f32 {
        if self.window.is_full() {
            self.window.pop_front();
        }
        // Room is guaranteed by the pop above
        self.window.push_back(sample).ok();
        self.mean().unwrap_or(sample)
    }

    /// Mean of the current window, `None` before the first sample.
    pub fn mean(&self) -> Option<f32> {
        if self.window.is_empty() {
            return None;
        }
        let sum: f32 = self.window.iter().sum();
        Some(sum / self.window.len() as f32)
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// True before the first sample.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}
