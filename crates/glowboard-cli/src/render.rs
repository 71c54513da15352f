//! Plain-text rendering of a board snapshot.

use std::fmt::Write;

use glowboard_core::board::BoardSnapshot;
use glowboard_core::{Rgb, TaskDetails, TaskState};

const BAR_WIDTH: usize = 20;

pub struct RenderOptions {
    pub show_seconds: bool,
    /// Emit ANSI truecolor swatches.
    pub color: bool,
}

pub fn render(snapshot: &BoardSnapshot, opts: &RenderOptions) -> String {
    let mut out = String::new();
    let clock = match snapshot.clock {
        Some(t) if opts.show_seconds => t.format_hms(),
        Some(t) => t.to_string(),
        None => "--:--".into(),
    };
    let _ = writeln!(out, "{}  {}", snapshot.greeting, clock);

    let Some(day) = snapshot.day else {
        let _ = writeln!(out, "(schedule has no days)");
        let _ = writeln!(out, "Next: {}", snapshot.next_up);
        return out;
    };
    let _ = writeln!(
        out,
        "== {} ({}/{}) ==",
        day,
        snapshot.day_index + 1,
        snapshot.day_count
    );

    if snapshot.tasks.is_empty() {
        let _ = writeln!(out, "  no tasks");
    }
    for task in &snapshot.tasks {
        let marker = match task.state {
            TaskState::Past => "x",
            TaskState::Active => ">",
            TaskState::Future => " ",
        };
        let _ = write!(
            out,
            "{marker} {}{}-{}  {}",
            swatch(task.color, opts.color),
            task.from,
            task.to,
            task.label
        );
        if let Some(pct) = task.progress_percent {
            let _ = write!(out, "  {}", progress_bar(pct));
        }
        out.push('\n');
    }

    if let Some(active) = &snapshot.active {
        match &active.details {
            Some(TaskDetails::Link(url)) => {
                let _ = writeln!(out, "Details: {url}");
            }
            Some(TaskDetails::Text(text)) => {
                let _ = writeln!(out, "Details: {text}");
            }
            None => {}
        }
    }
    let _ = writeln!(out, "Next: {}", snapshot.next_up);
    out
}

fn swatch(color: Rgb, enabled: bool) -> String {
    if enabled {
        format!("\x1b[38;2;{};{};{}m\u{25a0}\x1b[0m ", color.r, color.g, color.b)
    } else {
        String::new()
    }
}

pub fn progress_bar(pct: u8) -> String {
    let filled = (pct as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {pct:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowboard_core::{BoardEngine, Day, EngineConfig, Schedule, Task, TimeOfDay, TimeWindow, Weekday};

    fn hm(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).unwrap()
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0), format!("[{}]   0%", "-".repeat(20)));
        assert_eq!(progress_bar(50), format!("[{}{}]  50%", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(100), format!("[{}] 100%", "#".repeat(20)));
    }

    #[test]
    fn renders_active_task_and_next_up() {
        let schedule = Schedule::new(
            "Ada",
            vec![Day {
                name: Weekday::Monday,
                tasks: vec![
                    Task::new("Inbox", TimeWindow::new(hm(9, 0), hm(9, 30)).unwrap(), Rgb::new(1, 2, 3))
                        .with_details("Clear it"),
                    Task::new("Review", TimeWindow::new(hm(10, 0), hm(11, 0)).unwrap(), Rgb::new(1, 2, 3)),
                ],
            }],
        );
        let mut engine = BoardEngine::new(schedule, &EngineConfig::default(), Weekday::Monday);
        engine.tick(hm(9, 15));

        let text = render(
            &engine.snapshot(),
            &RenderOptions {
                show_seconds: false,
                color: false,
            },
        );
        assert!(text.starts_with("Welcome, Ada!  09:15\n"));
        assert!(text.contains("== Monday (1/1) =="));
        assert!(text.contains("> 09:00-09:30  Inbox  ["));
        assert!(text.contains("  10:00-11:00  Review\n"));
        assert!(text.contains("Details: Clear it"));
        assert!(text.ends_with("Next: Review (10:00)\n"));
    }
}
