//! Clock sampling.
//!
//! The engine never reads the system clock itself. The caller samples a
//! [`Clock`] on its tick cadence and hands the resulting [`TimeOfDay`] in.

mod time_of_day;

pub use time_of_day::TimeOfDay;

use chrono::{Datelike, Local, Timelike};

use crate::schedule::Weekday;

/// Source of the current local time of day and weekday.
pub trait Clock {
    fn now(&self) -> TimeOfDay;
    fn weekday(&self) -> Weekday;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeOfDay {
        let now = Local::now();
        TimeOfDay::from_secs(now.num_seconds_from_midnight())
    }

    fn weekday(&self) -> Weekday {
        Weekday::from(Local::now().weekday())
    }
}

/// Clock pinned to a fixed instant. Used by `--at` and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub time: TimeOfDay,
    pub weekday: Weekday,
}

impl FixedClock {
    pub fn new(time: TimeOfDay, weekday: Weekday) -> Self {
        Self { time, weekday }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> TimeOfDay {
        self.time
    }

    fn weekday(&self) -> Weekday {
        self.weekday
    }
}
