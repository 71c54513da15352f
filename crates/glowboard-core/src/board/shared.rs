use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::engine::{BoardEngine, BoardSnapshot};
use super::navigator::Direction;
use crate::clock::TimeOfDay;
use crate::error::LoadError;
use crate::events::Event;
use crate::schedule::Schedule;

/// Cloneable handle that serializes access to one [`BoardEngine`].
///
/// Ticks, gesture releases, button navigation and reloads each run under a
/// single lock acquisition, so a tick never observes a half re-seeded day.
#[derive(Debug, Clone)]
pub struct SharedBoard {
    inner: Arc<Mutex<BoardEngine>>,
}

impl SharedBoard {
    pub fn new(engine: BoardEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardEngine> {
        // Engine methods leave no partial state behind on panic.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn tick(&self, now: TimeOfDay) -> (Vec<Event>, BoardSnapshot) {
        let mut engine = self.lock();
        let events = engine.tick(now);
        (events, engine.snapshot())
    }

    pub fn advance(&self, direction: Direction, now: TimeOfDay) -> (Vec<Event>, BoardSnapshot) {
        let mut engine = self.lock();
        let events = engine.advance(direction, now);
        (events, engine.snapshot())
    }

    pub fn begin_drag(&self, x: f64) {
        self.lock().begin_drag(x);
    }

    pub fn update_drag(&self, x: f64) -> Option<f64> {
        self.lock().update_drag(x)
    }

    pub fn release_drag(&self, now: TimeOfDay) -> (Vec<Event>, BoardSnapshot) {
        let mut engine = self.lock();
        let events = engine.release_drag(now);
        (events, engine.snapshot())
    }

    pub fn apply_release(&self, dx: f64, now: TimeOfDay) -> (Vec<Event>, BoardSnapshot) {
        let mut engine = self.lock();
        let events = engine.apply_release(dx, now);
        (events, engine.snapshot())
    }

    pub fn reload(&self, schedule: Schedule, now: TimeOfDay) -> (Vec<Event>, BoardSnapshot) {
        let mut engine = self.lock();
        let events = engine.reload(schedule, now);
        (events, engine.snapshot())
    }

    /// Load the schedule at `path` and swap it in.
    ///
    /// The file is parsed before the lock is taken. On failure nothing is
    /// applied: schedule, selected day and one-shot flags stay as they were.
    pub fn reload_from(
        &self,
        path: &Path,
        now: TimeOfDay,
    ) -> Result<(Vec<Event>, BoardSnapshot), LoadError> {
        let schedule = Schedule::load(path)?;
        for warning in schedule.order_warnings() {
            tracing::warn!(%warning, "schedule order");
        }
        Ok(self.reload(schedule, now))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut BoardEngine) -> R) -> R {
        f(&mut self.lock())
    }
}
