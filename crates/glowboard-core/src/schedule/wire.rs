//! On-disk schedule document shape.
//!
//! ```json
//! { "name": "Ada",
//!   "days": [ { "day": "Monday", "tasks": [
//!       { "task": "Standup", "from": "09:00", "to": "09:15",
//!         "rgb": "0,200,255", "details": "https://example.com" } ] } ] }
//! ```

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct ScheduleDoc {
    pub name: String,
    #[serde(default)]
    pub days: Vec<DayDoc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DayDoc {
    pub day: String,
    #[serde(default)]
    pub tasks: Vec<TaskDoc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskDoc {
    pub task: String,
    pub from: String,
    pub to: String,
    pub rgb: String,
    #[serde(default)]
    pub details: Option<String>,
}
