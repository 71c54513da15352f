//! Live board: ticks on the configured cadence and reads navigation
//! commands from stdin.
//!
//! Commands (one per line):
//! - `n` / `next`, `p` / `prev`: button navigation
//! - `drag <dx>`: a released horizontal drag of `dx` pixels
//! - `r` / `reload`: re-read the schedule file
//! - `q` / `quit`

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use glowboard_core::board::BoardSnapshot;
use glowboard_core::{
    dispatch, BoardEngine, Clock, Config, Direction, EffectSink, Event, Schedule, SharedBoard,
    SystemClock, Weekday,
};
use tokio::sync::mpsc;

use super::{load_schedule, schedule_path, CliResult};
use crate::alerts::TerminalAlerts;
use crate::render::{render, RenderOptions};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Navigate(Direction),
    Drag(f64),
    Reload,
    Quit,
}

/// Parse one stdin line. Unknown input yields an error message.
pub fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(None);
    };
    let input = match cmd {
        "n" | "next" => Input::Navigate(Direction::Forward),
        "p" | "prev" => Input::Navigate(Direction::Backward),
        "r" | "reload" => Input::Reload,
        "q" | "quit" => Input::Quit,
        "drag" => {
            let dx = words
                .next()
                .ok_or("drag needs a displacement")?
                .parse::<f64>()
                .map_err(|e| format!("bad displacement: {e}"))?;
            Input::Drag(dx)
        }
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(input))
}

pub fn run(schedule_override: Option<&Path>, day: Option<Weekday>) -> CliResult {
    let config = Config::load_or_default();
    let path = schedule_path(schedule_override, &config)?;
    let schedule = load_schedule(Some(&path), &config)?;
    if let Some(day) = day {
        if schedule.day_by_name(day).is_none() {
            return Err(format!("{day} is not in the schedule").into());
        }
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch_loop(config, path, schedule, day))
}

async fn watch_loop(
    config: Config,
    path: PathBuf,
    schedule: Schedule,
    day: Option<Weekday>,
) -> CliResult {
    let clock = SystemClock;
    let board = SharedBoard::new(BoardEngine::new(
        schedule,
        &config.engine,
        day.unwrap_or_else(|| clock.weekday()),
    ));
    let opts = RenderOptions {
        show_seconds: config.display.show_seconds,
        color: std::io::stdout().is_terminal(),
    };
    let mut alerts = TerminalAlerts::new(std::io::stdout(), &config.display);
    let mut last_frame = String::new();

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(tx);

    let mut ticker = tokio::time::interval(Duration::from_millis(config.engine.tick_interval_ms));
    loop {
        let (events, snapshot) = tokio::select! {
            biased;
            _ = ticker.tick() => board.tick(clock.now()),
            Some(input) = rx.recv() => match input {
                Input::Navigate(direction) => board.advance(direction, clock.now()),
                Input::Drag(dx) => board.apply_release(dx, clock.now()),
                Input::Reload => match board.reload_from(&path, clock.now()) {
                    Ok(frame) => frame,
                    Err(err) => {
                        tracing::warn!(error = %err, "reload failed, keeping previous schedule");
                        eprintln!("reload failed: {err}");
                        continue;
                    }
                },
                Input::Quit => break,
            },
            else => break,
        };

        present(&events, &snapshot, &opts, &mut alerts, &mut last_frame);
    }
    Ok(())
}

/// Reads commands on a plain thread, outside the runtime. Stops after `q`
/// or EOF, either way sending `Input::Quit`.
fn spawn_stdin_reader(tx: mpsc::UnboundedSender<Input>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            match parse_input(&line) {
                Ok(Some(Input::Quit)) => break,
                Ok(Some(input)) => {
                    if tx.send(input).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(msg) => eprintln!("{msg}"),
            }
        }
        let _ = tx.send(Input::Quit);
    });
}

fn present(
    events: &[Event],
    snapshot: &BoardSnapshot,
    opts: &RenderOptions,
    alerts: &mut dyn EffectSink,
    last_frame: &mut String,
) {
    dispatch(events, &mut [alerts]);

    // Redraw only when something other than the clock changed.
    let frame = render(snapshot, opts);
    let body = frame.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    let last_body = last_frame.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    if body != last_body || !events.is_empty() {
        print!("{frame}");
        *last_frame = frame;
    }
}
