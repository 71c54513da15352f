//! Core error types for glowboard-core.
//!
//! This module defines the error hierarchy using thiserror. Load errors are
//! raised while turning a schedule document into the domain model; nothing
//! from a failed load is ever applied to a running engine.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for glowboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule load errors
    #[error("Schedule load error: {0}")]
    Load(#[from] LoadError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised while loading a schedule document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to read the schedule file
    #[error("Failed to read schedule at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON or does not have the expected shape
    #[error("Malformed schedule JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A `from`/`to` value is not a valid `HH:MM` time
    #[error("Invalid time '{value}' for task '{task}': {reason}")]
    InvalidTime {
        task: String,
        value: String,
        reason: String,
    },

    /// A task window does not satisfy `from < to`
    #[error("Task '{task}' has an empty time window: {from} is not before {to}")]
    EmptyWindow {
        task: String,
        from: String,
        to: String,
    },

    /// An `rgb` value is not a valid `r,g,b` triple
    #[error("Invalid color '{value}' for task '{task}'")]
    InvalidColor { task: String, value: String },

    /// The `day` field is not one of the seven weekday names
    #[error("Unknown weekday '{0}'")]
    UnknownWeekday(String),

    /// The same weekday appears more than once
    #[error("Weekday '{0}' appears more than once")]
    DuplicateDay(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine or create the data directory
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
