use std::io::IsTerminal;
use std::path::Path;

use clap::Args;
use glowboard_core::{BoardEngine, Clock, Config, NextUp, Schedule, TimeOfDay, Weekday};

use super::{load_schedule, resolve_clock, CliResult};
use crate::render::{render, RenderOptions};

#[derive(Args, Debug)]
pub struct WhenArgs {
    /// Evaluate at this time of day (HH:MM or HH:MM:SS) instead of now
    #[arg(long, value_parser = parse_time)]
    pub at: Option<TimeOfDay>,
    /// Show this weekday instead of today
    #[arg(long, value_parser = parse_weekday)]
    pub day: Option<Weekday>,
}

pub fn parse_time(value: &str) -> Result<TimeOfDay, String> {
    value.parse()
}

pub fn parse_weekday(value: &str) -> Result<Weekday, String> {
    value.parse().map_err(|e: glowboard_core::LoadError| e.to_string())
}

/// An explicit `--day` the schedule lacks. Without `--day`, a missing
/// today falls back to the first scheduled day like `watch` does.
fn unscheduled_day(schedule: &Schedule, day: Option<Weekday>) -> Option<Weekday> {
    day.filter(|d| schedule.day_by_name(*d).is_none())
}

pub fn show(schedule_override: Option<&Path>, when: WhenArgs, json: bool) -> CliResult {
    let config = Config::load_or_default();
    let schedule = load_schedule(schedule_override, &config)?;
    let clock = resolve_clock(when.at, when.day);

    if let Some(day) = unscheduled_day(&schedule, when.day) {
        if json {
            let value = serde_json::json!({
                "owner_name": schedule.owner_name,
                "day": day,
                "tasks": [],
                "next_up": NextUp::Exhausted,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{day}: no tasks scheduled");
            println!("Next: {}", NextUp::Exhausted);
        }
        return Ok(());
    }

    let mut engine = BoardEngine::new(schedule, &config.engine, clock.weekday());
    engine.tick(clock.now());
    let snapshot = engine.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let opts = RenderOptions {
            show_seconds: config.display.show_seconds,
            color: std::io::stdout().is_terminal(),
        };
        print!("{}", render(&snapshot, &opts));
    }
    Ok(())
}

pub fn next(schedule_override: Option<&Path>, when: WhenArgs) -> CliResult {
    let config = Config::load_or_default();
    let schedule = load_schedule(schedule_override, &config)?;
    let clock = resolve_clock(when.at, when.day);

    let next = match unscheduled_day(&schedule, when.day) {
        Some(_) => NextUp::Exhausted,
        None => BoardEngine::new(schedule, &config.engine, clock.weekday()).next_up(clock.now()),
    };
    println!("{next}");
    Ok(())
}

pub fn days(schedule_override: Option<&Path>) -> CliResult {
    let config = Config::load_or_default();
    let schedule = load_schedule(schedule_override, &config)?;
    let today = resolve_clock(None, None).weekday();

    if schedule.days.is_empty() {
        println!("no days scheduled");
    }
    for (index, day) in schedule.days.iter().enumerate() {
        let marker = if day.name == today { "*" } else { " " };
        println!("{marker} {index} {:<9} {} tasks", day.name, day.tasks.len());
    }
    Ok(())
}
