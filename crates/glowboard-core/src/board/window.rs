//! Time windows and the per-task state classifier.
//!
//! Both functions here are pure: calling them any number of times with the
//! same `now` gives the same answer and touches nothing.

use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;

/// Where a task sits relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Past,
    Active,
    Future,
}

/// Half-open interval `[start, end)` within one day. `start < end` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct WindowBounds {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<WindowBounds> for TimeWindow {
    type Error = String;

    fn try_from(value: WindowBounds) -> Result<Self, Self::Error> {
        TimeWindow::new(value.start, value.end)
            .ok_or_else(|| format!("{} is not before {}", value.start, value.end))
    }
}

impl TimeWindow {
    /// Returns `None` unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_secs(&self) -> u32 {
        self.end.secs() - self.start.secs()
    }

    pub fn contains(&self, now: TimeOfDay) -> bool {
        self.start <= now && now < self.end
    }

    /// Fraction of the window elapsed at `now`, clamped to `0.0..=1.0`.
    pub fn progress(&self, now: TimeOfDay) -> f64 {
        let elapsed = now.secs().saturating_sub(self.start.secs()) as f64;
        (elapsed / self.duration_secs() as f64).clamp(0.0, 1.0)
    }

    /// Whole-number percentage, meaningful only while the window is active.
    pub fn progress_percent(&self, now: TimeOfDay) -> Option<u8> {
        self.contains(now)
            .then(|| (self.progress(now) * 100.0).floor() as u8)
    }
}

/// `Future` before start, `Active` from start up to (not including) end,
/// `Past` from end onward.
pub fn classify(now: TimeOfDay, window: &TimeWindow) -> TaskState {
    if now < window.start {
        TaskState::Future
    } else if now < window.end {
        TaskState::Active
    } else {
        TaskState::Past
    }
}
