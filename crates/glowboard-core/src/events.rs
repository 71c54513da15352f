use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::schedule::Weekday;

/// Every boundary crossing or day change produces an Event.
/// Presentation and notification collaborators consume them; each one is
/// emitted at most once per occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// `now` reached the task's start.
    TaskStarted {
        task: String,
        start: TimeOfDay,
        /// The task had already ended when its start was first observed,
        /// e.g. the day was selected late in the evening.
        late: bool,
        at: TimeOfDay,
    },
    /// `now` entered the warning window before the task's end.
    TaskEndingSoon {
        task: String,
        end: TimeOfDay,
        at: TimeOfDay,
    },
    /// The identity of the active task changed.
    ActiveTaskChanged {
        previous: Option<String>,
        current: Option<String>,
        at: TimeOfDay,
    },
    /// The navigator selected a different day (or re-seeded the same one).
    DaySelected { index: usize, day: Weekday },
    /// A new schedule replaced the previous one.
    ScheduleReloaded { owner_name: String, days: usize },
}

impl Event {
    /// Short machine-friendly name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TaskStarted { .. } => "task_started",
            Event::TaskEndingSoon { .. } => "task_ending_soon",
            Event::ActiveTaskChanged { .. } => "active_task_changed",
            Event::DaySelected { .. } => "day_selected",
            Event::ScheduleReloaded { .. } => "schedule_reloaded",
        }
    }
}
