//! The temporal task-state engine and its parts.

mod engine;
pub mod navigator;
pub mod next_up;
mod shared;
pub mod trigger;
pub mod window;

pub use engine::{ActiveView, BoardEngine, BoardSnapshot, TaskRuntime, TaskView};
pub use navigator::{interpret_release, DayNavigator, Direction, DragGesture};
pub use next_up::{find_next, NextUp};
pub use shared::SharedBoard;
pub use trigger::{ActiveTracker, SideEffectTrigger, TaskFlags};
pub use window::{classify, TaskState, TimeWindow};
