use std::path::Path;

use glowboard_core::{Config, Schedule};

use super::{schedule_path, CliResult};

pub fn run(path: Option<&Path>) -> CliResult {
    let config = Config::load_or_default();
    let path = schedule_path(path, &config)?;
    let schedule = Schedule::load(&path)?;

    let task_count: usize = schedule.days.iter().map(|d| d.tasks.len()).sum();
    println!(
        "ok: {} ({} days, {} tasks)",
        schedule.owner_name,
        schedule.day_count(),
        task_count
    );
    for warning in schedule.order_warnings() {
        println!("warning: {warning}");
    }
    Ok(())
}
