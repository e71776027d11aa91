//! Core error types for studyplan-core.
//!
//! Input validation failures are collected in [`PlanError`]; configuration
//! file problems in [`ConfigError`]. [`CoreError`] wraps both for callers
//! that cross module boundaries.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Plan/timer input validation errors
    #[error("Validation error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input validation errors.
///
/// All of these are fatal for the call that raised them and are never
/// retried; callers surface them as form feedback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Grade/level code not present in the curriculum catalog
    #[error("Unknown grade level: {0}")]
    UnknownGradeLevel(String),

    /// No availability day is enabled
    #[error("No study day is enabled")]
    EmptyAvailability,

    /// An enabled availability window is malformed
    #[error("Invalid window for {day}: {message}")]
    InvalidWindow { day: String, message: String },

    /// No subject is enabled
    #[error("No subject is enabled")]
    EmptyCurriculum,

    /// A timer or horizon duration is not positive
    #[error("Invalid duration for '{field}': {message}")]
    InvalidDuration { field: String, message: String },

    /// A session date would fall outside the supported calendar
    #[error("A {weeks}-week plan starting {start_date} runs past the supported calendar")]
    DateOutOfRange { start_date: NaiveDate, weeks: u32 },

    /// Session id not present in the plan
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// Subject id referenced by an override is not in the curriculum
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    /// Subject record violates its value ranges
    #[error("Invalid subject '{id}': {message}")]
    InvalidSubject { id: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {}: {message}", path.display())]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {}: {message}", path.display())]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

impl PlanError {
    pub(crate) fn invalid_duration(field: &str, message: impl Into<String>) -> Self {
        PlanError::InvalidDuration {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_error_converts_into_core_error() {
        let err: CoreError = PlanError::EmptyCurriculum.into();
        assert!(matches!(err, CoreError::Plan(PlanError::EmptyCurriculum)));
        assert_eq!(err.to_string(), "Validation error: No subject is enabled");
    }

    #[test]
    fn invalid_window_message_names_the_day() {
        let err = PlanError::InvalidWindow {
            day: "monday".into(),
            message: "end must be after start".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid window for monday: end must be after start"
        );
    }
}
