//! Wall-clock budget tracking and cooperative deadline polling.
//!
//! A [`TimeBudget`] is created once per `compute_next_action` call. Both
//! engines poll it cooperatively from inside their traversal loops; nothing
//! is preempted, so a single expensive playout can overrun the deadline and
//! callers must treat the budget as advisory.

use std::time::{Duration, Instant};

/// Minimum margin reserved for result assembly after search stops.
const MIN_MARGIN: Duration = Duration::from_millis(1);

/// Maximum margin reserved for result assembly.
const MAX_MARGIN: Duration = Duration::from_secs(1);

/// Deadline bookkeeping for one search invocation.
///
/// `timeout` is the full caller-supplied budget; `actual_timeout` is
/// slightly reduced, reserving margin to assemble and return a result.
#[derive(Clone, Debug)]
pub struct TimeBudget {
    start: Instant,
    timeout: Duration,
    actual_timeout: Duration,
}

impl TimeBudget {
    /// Start the clock for a budget of `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let margin = (timeout / 20).clamp(MIN_MARGIN, MAX_MARGIN);
        Self {
            start: Instant::now(),
            timeout,
            actual_timeout: timeout.saturating_sub(margin),
        }
    }

    /// Nanoseconds since the budget started.
    #[must_use]
    pub fn nanos_elapsed(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    /// Nanoseconds of search budget remaining. Never negative.
    #[must_use]
    pub fn nanos_left(&self) -> u64 {
        (self.actual_timeout.as_nanos() as u64).saturating_sub(self.nanos_elapsed())
    }

    /// Whole seconds of search budget remaining, truncated.
    ///
    /// The empirically fitted scheduling formulas were tuned against
    /// truncated seconds; keep the truncation.
    #[must_use]
    pub fn seconds_left(&self) -> u64 {
        self.nanos_left() / 1_000_000_000
    }

    /// The full caller-supplied budget in nanoseconds.
    #[must_use]
    pub fn timeout_nanos(&self) -> u64 {
        self.timeout.as_nanos() as u64
    }

    /// True once the search budget (with margin) is exhausted.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.nanos_left() == 0
    }

    /// True once `1/proportion` of the search budget is consumed. Used to
    /// cap bounded sub-tasks such as minimum-playout batches.
    #[must_use]
    pub fn should_stop_proportion(&self, proportion: u32) -> bool {
        let limit = self.actual_timeout.as_nanos() as u64 / u64::from(proportion.max(1));
        self.nanos_elapsed() >= limit
    }
}

/// Polls a [`TimeBudget`] only every `stride`-th call, bounding the cost of
/// clock reads relative to node-processing cost. The stride trades polling
/// overhead against deadline overshoot.
#[derive(Clone, Debug)]
pub struct PollTicker {
    stride: u32,
    count: u32,
}

impl PollTicker {
    /// Create a ticker that consults the clock every `stride` calls.
    #[must_use]
    pub fn new(stride: u32) -> Self {
        Self {
            stride: stride.max(1),
            count: 0,
        }
    }

    /// Check the deadline if this call falls on the polling stride.
    /// Off-stride calls return `false` without touching the clock.
    pub fn should_stop(&mut self, budget: &TimeBudget) -> bool {
        let poll = self.count % self.stride == 0;
        self.count = self.count.wrapping_add(1);
        poll && budget.should_stop()
    }
}
