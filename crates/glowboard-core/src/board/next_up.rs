//! Next-up lookup.
//!
//! The scan trusts stored order: the first task whose start is still ahead
//! of `now` wins. Unsorted days give a wrong answer rather than an error;
//! [`crate::schedule::Schedule::order_warnings`] is where that gets reported.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::schedule::Task;

pub const NO_MORE_TASKS: &str = "No more tasks";

/// First task with `start > now`, in stored order. Active tasks never count.
pub fn find_next(now: TimeOfDay, tasks: &[Task]) -> Option<&Task> {
    tasks.iter().find(|t| t.start() > now)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NextUp {
    Task { label: String, start: TimeOfDay },
    /// Nothing left to start today.
    Exhausted,
}

impl NextUp {
    pub fn resolve(now: TimeOfDay, tasks: &[Task]) -> Self {
        match find_next(now, tasks) {
            Some(task) => NextUp::Task {
                label: task.label.clone(),
                start: task.start(),
            },
            None => NextUp::Exhausted,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, NextUp::Exhausted)
    }
}

impl fmt::Display for NextUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextUp::Task { label, start } => write!(f, "{label} ({start})"),
            NextUp::Exhausted => f.write_str(NO_MORE_TASKS),
        }
    }
}
