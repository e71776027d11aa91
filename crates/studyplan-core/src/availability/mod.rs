//! Weekly study availability.
//!
//! The learner picks study days and a start/end wall-clock time for each.
//! [`validate`] turns that form into [`ValidatedWindows`], the only input
//! type the schedule generator accepts, so an unchecked window can never
//! reach it.

mod day;
pub(crate) mod hhmm;

pub use day::DayKey;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::curriculum::Subject;
use crate::error::PlanError;

/// One row of the availability form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDay {
    pub day_key: DayKey,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl AvailabilityDay {
    /// Build an enabled day from `HH:MM` strings.
    ///
    /// Returns `None` if either time does not parse.
    pub fn new(day_key: DayKey, start: &str, end: &str) -> Option<Self> {
        Some(Self {
            day_key,
            start_time: hhmm::parse(start)?,
            end_time: hhmm::parse(end)?,
            enabled: true,
        })
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// An enabled day that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedWindow {
    pub day_key: DayKey,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
}

/// Enabled windows in the order the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedWindows {
    windows: Vec<ValidatedWindow>,
}

impl ValidatedWindows {
    pub fn iter(&self) -> std::slice::Iter<'_, ValidatedWindow> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Always false for a value produced by [`validate`].
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn total_weekly_minutes(&self) -> i64 {
        self.windows.iter().map(|w| w.duration_minutes).sum()
    }
}

impl<'a> IntoIterator for &'a ValidatedWindows {
    type Item = &'a ValidatedWindow;
    type IntoIter = std::slice::Iter<'a, ValidatedWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

/// Validate the availability form.
///
/// Disabled rows are ignored entirely. Every enabled row must end strictly
/// after it starts, and two enabled rows for the same weekday must not
/// overlap.
pub fn validate(days: &[AvailabilityDay]) -> Result<ValidatedWindows, PlanError> {
    let mut windows: Vec<ValidatedWindow> = Vec::new();

    for day in days.iter().filter(|d| d.enabled) {
        if day.end_time <= day.start_time {
            return Err(PlanError::InvalidWindow {
                day: day.day_key.to_string(),
                message: format!(
                    "end time {} must be after start time {}",
                    day.end_time.format("%H:%M"),
                    day.start_time.format("%H:%M")
                ),
            });
        }

        if let Some(clash) = windows.iter().find(|w| {
            w.day_key == day.day_key && w.start_time < day.end_time && day.start_time < w.end_time
        }) {
            return Err(PlanError::InvalidWindow {
                day: day.day_key.to_string(),
                message: format!(
                    "{}-{} overlaps {}-{}",
                    day.start_time.format("%H:%M"),
                    day.end_time.format("%H:%M"),
                    clash.start_time.format("%H:%M"),
                    clash.end_time.format("%H:%M")
                ),
            });
        }

        windows.push(ValidatedWindow {
            day_key: day.day_key,
            start_time: day.start_time,
            end_time: day.end_time,
            duration_minutes: (day.end_time - day.start_time).num_minutes(),
        });
    }

    if windows.is_empty() {
        return Err(PlanError::EmptyAvailability);
    }

    Ok(ValidatedWindows { windows })
}

/// Advisory signal that the curriculum asks for more weekly time than the
/// learner has available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityWarning {
    pub required_minutes: i64,
    pub available_minutes: i64,
}

impl CapacityWarning {
    pub fn shortfall_minutes(&self) -> i64 {
        self.required_minutes - self.available_minutes
    }
}

/// Compare enabled subjects' weekly targets against available weekly time.
///
/// Returns a warning only when the requirement exceeds availability.
pub fn capacity_check(subjects: &[Subject], windows: &ValidatedWindows) -> Option<CapacityWarning> {
    let required_minutes = subjects
        .iter()
        .filter(|s| s.enabled)
        .map(|s| s.weekly_hours * 60.0)
        .sum::<f64>()
        .round() as i64;
    let available_minutes = windows.total_weekly_minutes();

    (required_minutes > available_minutes).then_some(CapacityWarning {
        required_minutes,
        available_minutes,
    })
}

/// The default availability form: weekday evenings, Saturday afternoon,
/// Sunday off.
pub fn default_week() -> Vec<AvailabilityDay> {
    let at = |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
    let day = |day_key, start: NaiveTime, end: NaiveTime, enabled| AvailabilityDay {
        day_key,
        start_time: start,
        end_time: end,
        enabled,
    };

    vec![
        day(DayKey::Monday, at(19, 0), at(22, 0), true),
        day(DayKey::Tuesday, at(19, 0), at(22, 0), true),
        day(DayKey::Wednesday, at(19, 0), at(22, 0), true),
        day(DayKey::Thursday, at(19, 0), at(22, 0), true),
        day(DayKey::Friday, at(19, 0), at(21, 0), true),
        day(DayKey::Saturday, at(14, 0), at(17, 0), true),
        day(DayKey::Sunday, at(14, 0), at(16, 0), false),
    ]
}
