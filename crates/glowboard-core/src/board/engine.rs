//! Board engine implementation.
//!
//! The board engine owns the loaded schedule, the day cursor and the
//! per-task runtime state of the selected day. Like a wall-clock timer it
//! has no internal thread: the caller samples a clock and calls `tick()`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = BoardEngine::new(schedule, &config.engine, clock.weekday());
//! // In a loop:
//! let events = engine.tick(clock.now());
//! let view = engine.snapshot();
//! ```
//!
//! Any change of selected day (buttons, gestures, reload) re-seeds every
//! one-shot flag of the newly selected day and re-evaluates it at once, so
//! no state carries over from the previous day.

use serde::{Deserialize, Serialize};

use super::navigator::{interpret_release, DayNavigator, Direction, DragGesture};
use super::next_up::NextUp;
use super::trigger::{ActiveTracker, SideEffectTrigger, TaskFlags};
use super::window::{classify, TaskState};
use crate::clock::TimeOfDay;
use crate::events::Event;
use crate::schedule::{Day, Rgb, Schedule, Task, TaskDetails, Weekday};
use crate::storage::EngineConfig;

/// Engine-owned mutable fields for one task of the selected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRuntime {
    pub state: TaskState,
    pub flags: TaskFlags,
}

impl Default for TaskRuntime {
    fn default() -> Self {
        Self {
            state: TaskState::Future,
            flags: TaskFlags::default(),
        }
    }
}

/// Presentation data for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    pub label: String,
    pub from: TimeOfDay,
    pub to: TimeOfDay,
    pub color: Rgb,
    pub state: TaskState,
    /// Only present while the task is active.
    pub progress_percent: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveView {
    pub label: String,
    pub details: Option<TaskDetails>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub owner_name: String,
    pub greeting: String,
    /// Time of the last tick, if any.
    pub clock: Option<TimeOfDay>,
    pub day_index: usize,
    pub day_count: usize,
    pub day: Option<Weekday>,
    pub tasks: Vec<TaskView>,
    pub active: Option<ActiveView>,
    pub next_up: NextUp,
}

/// Temporal task-state engine.
#[derive(Debug, Clone)]
pub struct BoardEngine {
    schedule: Schedule,
    navigator: DayNavigator,
    trigger: SideEffectTrigger,
    drag_threshold: f64,
    /// Parallel to the selected day's tasks.
    runtime: Vec<TaskRuntime>,
    active: ActiveTracker,
    drag: DragGesture,
    last_now: Option<TimeOfDay>,
}

impl BoardEngine {
    /// Create an engine showing `today` if the schedule has it, otherwise
    /// the first day. Nothing is evaluated until the first `tick()`.
    pub fn new(schedule: Schedule, config: &EngineConfig, today: Weekday) -> Self {
        let index = schedule.index_of(today).unwrap_or(0);
        let navigator = DayNavigator::new(schedule.day_count(), index);
        let runtime = vec![TaskRuntime::default(); day_len(&schedule, navigator.index())];
        tracing::info!(
            owner = %schedule.owner_name,
            days = schedule.day_count(),
            index = navigator.index(),
            "board engine created"
        );
        Self {
            schedule,
            navigator,
            trigger: SideEffectTrigger::new(config.warning_window_minutes),
            drag_threshold: config.drag_threshold_px,
            runtime,
            active: ActiveTracker::default(),
            drag: DragGesture::default(),
            last_now: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn day_index(&self) -> usize {
        self.navigator.index()
    }

    pub fn selected_day(&self) -> Option<&Day> {
        self.schedule.day_at(self.navigator.index())
    }

    /// Tasks of the selected day; empty for an empty schedule.
    pub fn tasks(&self) -> &[Task] {
        self.selected_day()
            .map(|d| d.tasks.as_slice())
            .unwrap_or(&[])
    }

    pub fn runtime(&self) -> &[TaskRuntime] {
        &self.runtime
    }

    pub fn last_tick(&self) -> Option<TimeOfDay> {
        self.last_now
    }

    /// The first task in stored order that read as active on the last tick.
    pub fn active_task(&self) -> Option<&Task> {
        self.tasks()
            .iter()
            .zip(&self.runtime)
            .find(|(_, rt)| rt.state == TaskState::Active)
            .map(|(task, _)| task)
    }

    pub fn next_up(&self, now: TimeOfDay) -> NextUp {
        NextUp::resolve(now, self.tasks())
    }

    /// Build a presentation snapshot from the last tick.
    ///
    /// Call `tick()` first. Before any tick `clock` is `None`, every task
    /// reads as `Future` and next-up is resolved from midnight.
    pub fn snapshot(&self) -> BoardSnapshot {
        let now = self.last_now;
        let tasks = self
            .tasks()
            .iter()
            .zip(&self.runtime)
            .map(|(task, rt)| TaskView {
                label: task.label.clone(),
                from: task.start(),
                to: task.end(),
                color: task.color,
                state: rt.state,
                progress_percent: match (rt.state, now) {
                    (TaskState::Active, Some(now)) => task.window.progress_percent(now),
                    _ => None,
                },
            })
            .collect();

        BoardSnapshot {
            owner_name: self.schedule.owner_name.clone(),
            greeting: format!("Welcome, {}!", self.schedule.owner_name),
            clock: now,
            day_index: self.navigator.index(),
            day_count: self.navigator.day_count(),
            day: self.selected_day().map(|d| d.name),
            tasks,
            active: self.active_task().map(|t| ActiveView {
                label: t.label.clone(),
                details: t.details.clone(),
            }),
            next_up: self.next_up(now.unwrap_or(TimeOfDay::MIDNIGHT)),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Re-evaluate every task of the selected day at `now`.
    ///
    /// Returns start, ending-soon and active-change events that crossed a
    /// boundary since they last fired.
    pub fn tick(&mut self, now: TimeOfDay) -> Vec<Event> {
        let day = self.navigator.index();
        let tasks = self
            .schedule
            .day_at(day)
            .map(|d| d.tasks.as_slice())
            .unwrap_or(&[]);

        let mut events = Vec::new();
        let mut active = None;
        for (task, rt) in tasks.iter().zip(self.runtime.iter_mut()) {
            rt.state = classify(now, &task.window);
            if rt.state == TaskState::Active && active.is_none() {
                active = Some(task.label.as_str());
            }
            events.extend(self.trigger.evaluate(task, &mut rt.flags, now));
        }
        events.extend(self.active.observe(active, now));
        self.last_now = Some(now);

        for event in &events {
            tracing::debug!(kind = event.kind(), at = %now, "board event");
        }
        events
    }

    /// Move one day and re-seed. No-op on an empty schedule.
    pub fn advance(&mut self, direction: Direction, now: TimeOfDay) -> Vec<Event> {
        if self.navigator.advance(direction) {
            self.reseed(now)
        } else {
            Vec::new()
        }
    }

    pub fn select_index(&mut self, index: usize, now: TimeOfDay) -> Vec<Event> {
        if self.navigator.select(index) {
            self.reseed(now)
        } else {
            Vec::new()
        }
    }

    /// Jump to `day`. A weekday missing from the schedule leaves the
    /// selection unchanged.
    pub fn select_day(&mut self, day: Weekday, now: TimeOfDay) -> Vec<Event> {
        match self.schedule.index_of(day) {
            Some(index) => self.select_index(index, now),
            None => {
                tracing::debug!(%day, "day not in schedule");
                Vec::new()
            }
        }
    }

    pub fn begin_drag(&mut self, x: f64) {
        self.drag.begin(x);
    }

    /// Live horizontal offset while dragging.
    pub fn update_drag(&mut self, x: f64) -> Option<f64> {
        self.drag.update(x)
    }

    /// Finish a drag; navigates if it moved further than the threshold.
    pub fn release_drag(&mut self, now: TimeOfDay) -> Vec<Event> {
        match self.drag.release() {
            Some(dx) => self.apply_release(dx, now),
            None => Vec::new(),
        }
    }

    /// Interpret a completed drag of `dx` and navigate accordingly.
    pub fn apply_release(&mut self, dx: f64, now: TimeOfDay) -> Vec<Event> {
        match interpret_release(dx, self.drag_threshold) {
            Some(direction) => self.advance(direction, now),
            None => Vec::new(),
        }
    }

    /// Replace the schedule wholesale. Keeps the same weekday selected when
    /// the new schedule has it, otherwise falls back to the first day.
    pub fn reload(&mut self, schedule: Schedule, now: TimeOfDay) -> Vec<Event> {
        let index = self
            .selected_day()
            .and_then(|d| schedule.index_of(d.name))
            .unwrap_or(0);
        self.navigator = DayNavigator::new(schedule.day_count(), index);
        self.schedule = schedule;
        tracing::info!(
            owner = %self.schedule.owner_name,
            days = self.schedule.day_count(),
            "schedule reloaded"
        );

        let mut events = vec![Event::ScheduleReloaded {
            owner_name: self.schedule.owner_name.clone(),
            days: self.schedule.day_count(),
        }];
        events.extend(self.reseed(now));
        events
    }

    pub fn set_config(&mut self, config: &EngineConfig) {
        self.trigger = SideEffectTrigger::new(config.warning_window_minutes);
        self.drag_threshold = config.drag_threshold_px;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reseed(&mut self, now: TimeOfDay) -> Vec<Event> {
        let index = self.navigator.index();
        self.runtime = vec![TaskRuntime::default(); day_len(&self.schedule, index)];
        self.active.reset();
        self.drag = DragGesture::default();

        let mut events = Vec::new();
        if let Some(day) = self.schedule.day_at(index) {
            tracing::info!(index, day = %day.name, "day selected");
            events.push(Event::DaySelected {
                index,
                day: day.name,
            });
        }
        events.extend(self.tick(now));
        events
    }
}

fn day_len(schedule: &Schedule, index: usize) -> usize {
    schedule.day_at(index).map(|d| d.tasks.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TimeWindow;

    fn hm(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).unwrap()
    }

    fn task(label: &str, from: (u32, u32), to: (u32, u32)) -> Task {
        Task::new(
            label,
            TimeWindow::new(hm(from.0, from.1), hm(to.0, to.1)).unwrap(),
            Rgb::new(0, 255, 0),
        )
    }

    fn week() -> Schedule {
        let days = Weekday::ALL
            .into_iter()
            .map(|name| Day {
                name,
                tasks: vec![
                    task(&format!("{name} A"), (9, 0), (9, 30)),
                    task(&format!("{name} B"), (10, 0), (10, 30)),
                ],
            })
            .collect();
        Schedule::new("Ada", days)
    }

    fn engine(today: Weekday) -> BoardEngine {
        BoardEngine::new(week(), &EngineConfig::default(), today)
    }

    fn count(events: &[Event], kind: &str) -> usize {
        events.iter().filter(|e| e.kind() == kind).count()
    }

    #[test]
    fn starts_on_today() {
        let e = engine(Weekday::Wednesday);
        assert_eq!(e.day_index(), 2);
        assert_eq!(e.selected_day().unwrap().name, Weekday::Wednesday);
    }

    #[test]
    fn falls_back_to_first_day() {
        let schedule = Schedule::new(
            "Ada",
            vec![Day {
                name: Weekday::Monday,
                tasks: vec![],
            }],
        );
        let e = BoardEngine::new(schedule, &EngineConfig::default(), Weekday::Sunday);
        assert_eq!(e.day_index(), 0);
    }

    #[test]
    fn snapshot_before_first_tick_has_no_clock() {
        let mut e = engine(Weekday::Monday);
        let snap = e.snapshot();
        assert_eq!(snap.clock, None);
        assert!(snap.tasks.iter().all(|t| t.state == TaskState::Future));
        assert_eq!(snap.next_up.to_string(), "Monday A (09:00)");
        assert!(snap.active.is_none());

        e.tick(hm(9, 15));
        let snap = e.snapshot();
        assert_eq!(snap.clock, Some(hm(9, 15)));
        assert_eq!(snap.tasks[0].state, TaskState::Active);
    }

    #[test]
    fn tick_classifies_and_tracks_progress() {
        let mut e = engine(Weekday::Monday);
        e.tick(hm(9, 15));
        let snap = e.snapshot();
        assert_eq!(snap.tasks[0].state, TaskState::Active);
        assert_eq!(snap.tasks[0].progress_percent, Some(50));
        assert_eq!(snap.tasks[1].state, TaskState::Future);
        assert_eq!(snap.tasks[1].progress_percent, None);
        assert_eq!(snap.active.unwrap().label, "Monday A");
        assert_eq!(snap.next_up.to_string(), "Monday B (10:00)");
        assert_eq!(snap.greeting, "Welcome, Ada!");
    }

    #[test]
    fn repeated_ticks_do_not_refire() {
        let mut e = engine(Weekday::Monday);
        let first = e.tick(hm(9, 0));
        assert_eq!(count(&first, "task_started"), 1);
        assert_eq!(count(&first, "active_task_changed"), 1);

        for _ in 0..10 {
            assert!(e.tick(hm(9, 0)).is_empty());
        }
        let runtime = e.runtime().to_vec();
        let snap = e.snapshot();
        e.tick(hm(9, 0));
        assert_eq!(e.runtime(), runtime.as_slice());
        assert_eq!(e.snapshot(), snap);
    }

    #[test]
    fn day_switch_reseeds_flags() {
        let mut e = engine(Weekday::Monday);
        e.tick(hm(9, 10));
        assert!(e.runtime()[0].flags.notified_start);

        let events = e.advance(Direction::Forward, hm(9, 10));
        assert_eq!(e.selected_day().unwrap().name, Weekday::Tuesday);
        assert!(matches!(
            events.first(),
            Some(Event::DaySelected { index: 1, day: Weekday::Tuesday })
        ));
        // Tuesday's first task starts fresh and fires again.
        assert_eq!(count(&events, "task_started"), 1);
        assert_eq!(count(&events, "active_task_changed"), 1);

        // Going back re-seeds Monday too.
        let events = e.advance(Direction::Backward, hm(9, 10));
        assert_eq!(count(&events, "task_started"), 1);
    }

    #[test]
    fn drag_release_respects_threshold() {
        let mut e = engine(Weekday::Monday);
        e.tick(hm(8, 0));

        e.begin_drag(100.0);
        e.update_drag(179.0);
        assert!(e.release_drag(hm(8, 0)).is_empty());
        assert_eq!(e.day_index(), 0);

        e.begin_drag(100.0);
        e.update_drag(181.0);
        e.release_drag(hm(8, 0));
        assert_eq!(e.day_index(), 6);

        e.apply_release(-81.0, hm(8, 0));
        assert_eq!(e.day_index(), 0);
    }

    #[test]
    fn reload_keeps_weekday_and_resets_state() {
        let mut e = engine(Weekday::Friday);
        e.tick(hm(9, 5));

        let mut schedule = week();
        schedule.days.retain(|d| d.name != Weekday::Monday);
        let events = e.reload(schedule, hm(9, 5));

        assert_eq!(e.selected_day().unwrap().name, Weekday::Friday);
        assert_eq!(e.day_index(), 3);
        assert!(matches!(events[0], Event::ScheduleReloaded { days: 6, .. }));
        assert_eq!(count(&events, "task_started"), 1);
    }

    #[test]
    fn empty_schedule_reports_empty_state() {
        let mut e = BoardEngine::new(
            Schedule::new("Nobody", vec![]),
            &EngineConfig::default(),
            Weekday::Monday,
        );
        assert!(e.tick(hm(12, 0)).is_empty());
        assert!(e.advance(Direction::Forward, hm(12, 0)).is_empty());
        assert!(e.apply_release(500.0, hm(12, 0)).is_empty());

        let snap = e.snapshot();
        assert_eq!(snap.day, None);
        assert_eq!(snap.day_count, 0);
        assert!(snap.tasks.is_empty());
        assert!(snap.next_up.is_exhausted());
    }

    #[test]
    fn overlapping_tasks_both_read_active() {
        let schedule = Schedule::new(
            "Ada",
            vec![Day {
                name: Weekday::Monday,
                tasks: vec![task("A", (9, 0), (10, 0)), task("B", (9, 30), (10, 30))],
            }],
        );
        let mut e = BoardEngine::new(schedule, &EngineConfig::default(), Weekday::Monday);
        e.tick(hm(9, 45));
        assert!(e.runtime().iter().all(|rt| rt.state == TaskState::Active));
        assert_eq!(e.active_task().unwrap().label, "A");
    }
}
