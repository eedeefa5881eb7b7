//! Core error types for paraboard-core.
//!
//! This module defines the error hierarchy using thiserror. Most of the
//! board never fails at runtime: missing days are empty, cache writes are
//! optional. Errors come from loading configuration and alternative
//! timetables.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for paraboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Timetable data errors
    #[error("Timetable error: {0}")]
    Timetable(#[from] TimetableError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
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

/// Errors in timetable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// A lesson time is not `HH:MM`
    #[error("Invalid lesson time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// A day key is outside 1..=7
    #[error("Invalid day '{0}': expected 1 (Monday) .. 7 (Sunday)")]
    InvalidDay(String),

    /// The timetable file could not be parsed
    #[error("Failed to parse timetable: {0}")]
    Parse(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid week selector
    #[error("Invalid week '{0}': expected odd/even or 1/2")]
    InvalidWeek(String),

    /// Invalid timestamp
    #[error("Invalid time '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
