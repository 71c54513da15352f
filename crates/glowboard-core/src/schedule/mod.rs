//! Schedule store: the owner's week of time-boxed tasks.
//!
//! A [`Schedule`] is built once from a JSON document and never partially
//! mutated afterwards. Validation happens entirely at load time: a document
//! with any bad time, color or weekday is rejected as a whole.
//!
//! Tasks keep the order they were written in. Nothing here sorts them;
//! [`Schedule::order_warnings`] reports days that are out of order or
//! overlap so callers can surface it.

mod weekday;
mod wire;

pub use weekday::Weekday;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::TimeWindow;
use crate::clock::TimeOfDay;
use crate::error::LoadError;

/// Task highlight color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `"r,g,b"`. Whitespace around each channel is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let mut channels = value.split(',').map(|c| c.trim().parse::<u8>());
        let r = channels.next()?.ok()?;
        let g = channels.next()?.ok()?;
        let b = channels.next()?.ok()?;
        if channels.next().is_some() {
            return None;
        }
        Some(Self { r, g, b })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Extra information attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TaskDetails {
    /// Rendered as a link to open.
    Link(String),
    /// Rendered as plain text.
    Text(String),
}

impl TaskDetails {
    /// Anything starting with `http` is a link.
    pub fn classify(raw: String) -> Self {
        if raw.starts_with("http") {
            TaskDetails::Link(raw)
        } else {
            TaskDetails::Text(raw)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskDetails::Link(s) | TaskDetails::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub label: String,
    pub window: TimeWindow,
    pub color: Rgb,
    pub details: Option<TaskDetails>,
}

impl Task {
    pub fn new(label: impl Into<String>, window: TimeWindow, color: Rgb) -> Self {
        Self {
            label: label.into(),
            window,
            color,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(TaskDetails::classify(details.into()));
        self
    }

    pub fn start(&self) -> TimeOfDay {
        self.window.start()
    }

    pub fn end(&self) -> TimeOfDay {
        self.window.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub name: Weekday,
    pub tasks: Vec<Task>,
}

/// A data-quality issue that does not prevent loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderWarning {
    /// `task` starts before the task listed ahead of it.
    Unsorted { day: Weekday, task: String },
    /// `second` starts before `first` ends.
    Overlap {
        day: Weekday,
        first: String,
        second: String,
    },
}

impl fmt::Display for OrderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderWarning::Unsorted { day, task } => {
                write!(f, "{day}: '{task}' starts before the task listed ahead of it")
            }
            OrderWarning::Overlap { day, first, second } => {
                write!(f, "{day}: '{second}' overlaps '{first}'")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub owner_name: String,
    pub days: Vec<Day>,
}

impl Schedule {
    pub fn new(owner_name: impl Into<String>, days: Vec<Day>) -> Self {
        Self {
            owner_name: owner_name.into(),
            days,
        }
    }

    /// Parse and validate a schedule document.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] for malformed JSON, bad `HH:MM` values,
    /// `from >= to`, bad colors, unknown or repeated weekday names.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let doc: wire::ScheduleDoc = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        let mut days = Vec::with_capacity(doc.days.len());

        for day_doc in doc.days {
            let name: Weekday = day_doc.day.parse()?;
            if !seen.insert(name) {
                return Err(LoadError::DuplicateDay(name.to_string()));
            }
            let tasks = day_doc
                .tasks
                .into_iter()
                .map(task_from_doc)
                .collect::<Result<Vec<_>, _>>()?;
            days.push(Day { name, tasks });
        }

        Ok(Self {
            owner_name: doc.name,
            days,
        })
    }

    /// Read and parse a schedule file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Schedule::from_json`].
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schedule = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            owner = %schedule.owner_name,
            days = schedule.days.len(),
            "schedule loaded"
        );
        Ok(schedule)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn day_at(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    pub fn index_of(&self, name: Weekday) -> Option<usize> {
        self.days.iter().position(|d| d.name == name)
    }

    /// A miss is not an error; callers treat it as a day without tasks.
    pub fn day_by_name(&self, name: Weekday) -> Option<&Day> {
        self.days.iter().find(|d| d.name == name)
    }

    /// Tasks for `name`, or an empty slice if that day is not scheduled.
    pub fn tasks_for(&self, name: Weekday) -> &[Task] {
        self.day_by_name(name).map(|d| d.tasks.as_slice()).unwrap_or(&[])
    }

    /// Report unsorted and overlapping tasks, day by day.
    pub fn order_warnings(&self) -> Vec<OrderWarning> {
        let mut warnings = Vec::new();
        for day in &self.days {
            for pair in day.tasks.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                if next.start() < prev.start() {
                    warnings.push(OrderWarning::Unsorted {
                        day: day.name,
                        task: next.label.clone(),
                    });
                } else if next.start() < prev.end() {
                    warnings.push(OrderWarning::Overlap {
                        day: day.name,
                        first: prev.label.clone(),
                        second: next.label.clone(),
                    });
                }
            }
        }
        warnings
    }
}

fn task_from_doc(doc: wire::TaskDoc) -> Result<Task, LoadError> {
    let invalid_time = |value: &str, reason: String| LoadError::InvalidTime {
        task: doc.task.clone(),
        value: value.to_string(),
        reason,
    };
    let from = TimeOfDay::parse_hm(&doc.from).map_err(|r| invalid_time(&doc.from, r))?;
    let to = TimeOfDay::parse_hm(&doc.to).map_err(|r| invalid_time(&doc.to, r))?;
    let window = TimeWindow::new(from, to).ok_or_else(|| LoadError::EmptyWindow {
        task: doc.task.clone(),
        from: doc.from.clone(),
        to: doc.to.clone(),
    })?;
    let color = Rgb::parse(&doc.rgb).ok_or_else(|| LoadError::InvalidColor {
        task: doc.task.clone(),
        value: doc.rgb.clone(),
    })?;

    Ok(Task {
        label: doc.task,
        window,
        color,
        details: doc.details.map(TaskDetails::classify),
    })
}
