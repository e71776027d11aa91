//! TOML-based application configuration.
//!
//! Stores the learner's defaults:
//! - Pomodoro durations
//! - Planning horizon, default grade and subject rotation
//! - The weekly availability form
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::availability::{self, AvailabilityDay};
use crate::error::ConfigError;
use crate::scheduler::{PlanRequest, Rotation, ScheduleGenerator, BIMESTER_WEEKS, MAX_WEEKS};
use crate::timer::PomodoroSettings;

/// Pomodoro durations, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    #[serde(default = "default_cycles_until_long_break")]
    pub cycles_until_long_break: u32,
}

/// Plan generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningConfig {
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    #[serde(default = "default_grade")]
    pub default_grade: String,
    #[serde(default)]
    pub rotation: Rotation,
}

/// Weekly availability form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    #[serde(default = "availability::default_week")]
    pub days: Vec<AvailabilityDay>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub availability: AvailabilityConfig,
}

// Default functions
fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_cycles_until_long_break() -> u32 {
    4
}
fn default_weeks() -> u32 {
    BIMESTER_WEEKS
}
fn default_grade() -> String {
    "6-ano".into()
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            cycles_until_long_break: default_cycles_until_long_break(),
        }
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            weeks: default_weeks(),
            default_grade: default_grade(),
            rotation: Rotation::default(),
        }
    }
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            days: availability::default_week(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config missing, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, keeping the value's type.
    ///
    /// The config is left untouched if the key is unknown or the result
    /// does not validate. Call [`save`](Self::save) to persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the engine would refuse later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pomodoro_settings()
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "pomodoro".into(),
                message: e.to_string(),
            })?;
        if !(1..=MAX_WEEKS).contains(&self.planning.weeks) {
            return Err(ConfigError::InvalidValue {
                key: "planning.weeks".into(),
                message: format!("must be between 1 and {MAX_WEEKS}"),
            });
        }
        Ok(())
    }

    pub fn pomodoro_settings(&self) -> PomodoroSettings {
        PomodoroSettings::new(
            self.pomodoro.focus_minutes,
            self.pomodoro.short_break_minutes,
            self.pomodoro.long_break_minutes,
            self.pomodoro.cycles_until_long_break,
        )
    }

    pub fn generator(&self) -> ScheduleGenerator {
        ScheduleGenerator::with_rotation(self.planning.rotation)
    }

    /// A plan request pre-filled from this config.
    pub fn plan_request(&self, grade_level: Option<&str>, created_at: NaiveDateTime) -> PlanRequest {
        let mut request = PlanRequest::new(
            grade_level.unwrap_or(&self.planning.default_grade),
            created_at,
        );
        request.availability = self.availability.days.clone();
        request.pomodoro_settings = self.pomodoro_settings();
        request.weeks = self.planning.weeks;
        request
    }
}
