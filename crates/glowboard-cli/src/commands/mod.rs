pub mod board;
pub mod config;
pub mod validate;
pub mod watch;

use std::path::{Path, PathBuf};

use glowboard_core::{Clock, Config, FixedClock, Schedule, SystemClock, TimeOfDay, Weekday};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// `--schedule` wins over the configured path.
pub fn schedule_path(
    override_path: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config.schedule_path()?),
    }
}

pub fn load_schedule(
    override_path: Option<&Path>,
    config: &Config,
) -> Result<Schedule, Box<dyn std::error::Error>> {
    let path = schedule_path(override_path, config)?;
    let schedule = Schedule::load(&path)?;
    for warning in schedule.order_warnings() {
        tracing::warn!(%warning, "schedule order");
    }
    Ok(schedule)
}

/// The system clock, with either part pinned by `--at` / `--day`.
pub fn resolve_clock(at: Option<TimeOfDay>, day: Option<Weekday>) -> FixedClock {
    let system = SystemClock;
    FixedClock::new(
        at.unwrap_or_else(|| system.now()),
        day.unwrap_or_else(|| system.weekday()),
    )
}
