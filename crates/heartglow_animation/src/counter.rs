//! Count-up animation for integer statistics

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default count-up duration
pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// Lifecycle of a counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterState {
    /// Not yet seen; displays 0
    #[default]
    Idle,
    Running,
    /// Displays the target
    Finished,
}

/// Counts from 0 up to `target` over `duration`
///
/// The displayed value is `floor(progress * target)` with
/// `progress = min(elapsed / duration, 1)`, and exactly `target` once the
/// duration has elapsed.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    target: u32,
    duration: Duration,
    elapsed: Duration,
    state: CounterState,
}

impl CounterAnimation {
    pub fn new(target: u32, duration: Duration) -> Self {
        Self {
            target,
            duration,
            elapsed: Duration::ZERO,
            state: CounterState::Idle,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    /// Value to display right now
    pub fn value(&self) -> u32 {
        match self.state {
            CounterState::Idle => 0,
            CounterState::Running => (self.progress() * self.target as f64).floor() as u32,
            CounterState::Finished => self.target,
        }
    }

    /// Fraction of the duration elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        match self.state {
            CounterState::Idle => 0.0,
            CounterState::Finished => 1.0,
            CounterState::Running if self.duration.is_zero() => 1.0,
            CounterState::Running => {
                (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
            }
        }
    }

    /// The counter's element became visible
    ///
    /// Starts counting only while the counter still displays 0; a counter
    /// that already ran is left alone. Returns whether it started.
    pub fn on_visible(&mut self) -> bool {
        if self.state != CounterState::Idle {
            return false;
        }
        debug!(target = self.target, "counter started");
        self.state = CounterState::Running;
        self.elapsed = Duration::ZERO;
        self.settle();
        true
    }

    /// Advance the clock by one frame and return the displayed value
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.state == CounterState::Running {
            self.elapsed = self.elapsed.saturating_add(dt);
            self.settle();
        }
        self.value()
    }

    fn settle(&mut self) {
        if self.elapsed >= self.duration {
            self.state = CounterState::Finished;
        }
    }
}
