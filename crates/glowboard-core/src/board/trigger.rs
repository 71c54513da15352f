//! Edge-triggered side effects.
//!
//! Each task carries two one-shot flags. A flag flips to `true` the first
//! time its condition is observed and stays set until the engine re-seeds
//! the day; re-observing the condition on later ticks never re-fires.

use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::events::Event;
use crate::schedule::Task;

pub const DEFAULT_WARNING_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFlags {
    pub notified_start: bool,
    pub notified_ending: bool,
}

/// Decides which start/ending-soon events a task produces on a tick.
#[derive(Debug, Clone, Copy)]
pub struct SideEffectTrigger {
    warning_minutes: u32,
}

impl Default for SideEffectTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_MINUTES)
    }
}

impl SideEffectTrigger {
    pub fn new(warning_minutes: u32) -> Self {
        Self { warning_minutes }
    }

    pub fn warning_minutes(&self) -> u32 {
        self.warning_minutes
    }

    /// Evaluate one task at `now`, setting flags for whatever fires.
    ///
    /// The ending-soon window does not require `now >= start`: for a task
    /// shorter than the warning window it opens before the task does.
    pub fn evaluate(&self, task: &Task, flags: &mut TaskFlags, now: TimeOfDay) -> Vec<Event> {
        let mut events = Vec::new();

        if now >= task.start() && !flags.notified_start {
            flags.notified_start = true;
            events.push(Event::TaskStarted {
                task: task.label.clone(),
                start: task.start(),
                late: now >= task.end(),
                at: now,
            });
        }

        let warn_from = task.end().saturating_sub_minutes(self.warning_minutes);
        if now >= warn_from && now < task.end() && !flags.notified_ending {
            flags.notified_ending = true;
            events.push(Event::TaskEndingSoon {
                task: task.label.clone(),
                end: task.end(),
                at: now,
            });
        }

        events
    }
}

/// Remembers which task was active on the previous tick.
#[derive(Debug, Clone, Default)]
pub struct ActiveTracker {
    current: Option<String>,
}

impl ActiveTracker {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Record the active task for this tick. Returns an event only when the
    /// identity differs from the last recorded one.
    pub fn observe(&mut self, active: Option<&str>, now: TimeOfDay) -> Option<Event> {
        if self.current.as_deref() == active {
            return None;
        }
        let previous = self.current.take();
        self.current = active.map(str::to_string);
        Some(Event::ActiveTaskChanged {
            previous,
            current: self.current.clone(),
            at: now,
        })
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
