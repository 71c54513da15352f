//! # Glowboard Core Library
//!
//! This library provides the logic behind Glowboard, a daily schedule board
//! that highlights the task in progress, tracks its completion and alerts at
//! task boundaries. Front-ends (the `glowboard` CLI, or any other renderer)
//! are thin layers that sample the clock, feed the engine and draw what it
//! returns.
//!
//! ## Architecture
//!
//! - **Board Engine**: A wall-clock-driven state machine that requires the
//!   caller to periodically invoke `tick()`; it classifies tasks, fires
//!   one-shot boundary events, finds the next task and navigates days
//! - **Schedule**: JSON schedule document, validated at load time
//! - **Storage**: TOML-based configuration
//! - **Effects**: Trait for collaborators that consume engine events
//!
//! ## Key Components
//!
//! - [`BoardEngine`]: Core task-state engine
//! - [`SharedBoard`]: Lock-guarded handle for ticking and navigating from
//!   separate tasks
//! - [`Schedule`]: Loaded week of tasks
//! - [`Config`]: Application configuration management
//! - [`EffectSink`]: Trait for event consumers

pub mod board;
pub mod clock;
pub mod effects;
pub mod error;
pub mod events;
pub mod schedule;
pub mod storage;

pub use board::{
    BoardEngine, BoardSnapshot, Direction, NextUp, SharedBoard, TaskState, TaskView, TimeWindow,
};
pub use clock::{Clock, FixedClock, SystemClock, TimeOfDay};
pub use effects::{dispatch, EffectError, EffectSink};
pub use error::{ConfigError, CoreError, LoadError};
pub use events::Event;
pub use schedule::{Day, Rgb, Schedule, Task, TaskDetails, Weekday};
pub use storage::{Config, DisplayConfig, EngineConfig};
