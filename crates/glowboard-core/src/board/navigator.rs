//! Circular day navigation and drag-gesture interpretation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DRAG_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Next day (+1).
    Forward,
    /// Previous day (-1).
    Backward,
}

/// Cursor over a fixed number of days that wraps at both ends.
///
/// With zero days every move is a no-op and the index stays at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNavigator {
    index: usize,
    day_count: usize,
}

impl DayNavigator {
    /// `index` is wrapped into range.
    pub fn new(day_count: usize, index: usize) -> Self {
        let index = if day_count == 0 { 0 } else { index % day_count };
        Self { index, day_count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }

    pub fn is_empty(&self) -> bool {
        self.day_count == 0
    }

    /// Move one day. Returns `true` if the index changed.
    pub fn advance(&mut self, direction: Direction) -> bool {
        if self.day_count == 0 {
            return false;
        }
        let before = self.index;
        self.index = match direction {
            Direction::Forward => (self.index + 1) % self.day_count,
            Direction::Backward => (self.index + self.day_count - 1) % self.day_count,
        };
        self.index != before
    }

    /// Jump straight to `index`. Out-of-range values are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.day_count || index == self.index {
            return false;
        }
        self.index = index;
        true
    }
}

/// Map a released horizontal drag to a navigation direction.
///
/// Dragging right (positive `dx`) reveals the previous day; dragging left
/// reveals the next. Anything within `threshold` snaps back.
pub fn interpret_release(dx: f64, threshold: f64) -> Option<Direction> {
    if dx > threshold {
        Some(Direction::Backward)
    } else if dx < -threshold {
        Some(Direction::Forward)
    } else {
        None
    }
}

/// In-progress pointer drag over the day panels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragGesture {
    start_x: Option<f64>,
    current_x: f64,
}

impl DragGesture {
    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
        self.current_x = x;
    }

    /// Update the pointer position. Returns the live offset for rendering,
    /// or `None` if no drag is in progress.
    pub fn update(&mut self, x: f64) -> Option<f64> {
        let start = self.start_x?;
        self.current_x = x;
        Some(x - start)
    }

    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }

    /// End the drag and return its total displacement. A release without a
    /// matching `begin` (e.g. pointer leaving an idle surface) yields `None`.
    pub fn release(&mut self) -> Option<f64> {
        let start = self.start_x.take()?;
        Some(self.current_x - start)
    }
}
