use serde::{Deserialize, Serialize};

use super::engine::PomodoroPhase;
use crate::error::PlanError;

/// Focus/break durations for a pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Every Nth focus interval is followed by a long break.
    pub cycles_until_long_break: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            cycles_until_long_break: 4,
        }
    }
}

impl PomodoroSettings {
    pub fn new(focus: u32, short_break: u32, long_break: u32, cycles_until_long_break: u32) -> Self {
        Self {
            focus_minutes: focus,
            short_break_minutes: short_break,
            long_break_minutes: long_break,
            cycles_until_long_break,
        }
    }

    /// All durations positive, long break every 2 or more cycles.
    pub fn validate(&self) -> Result<(), PlanError> {
        let minutes = [
            ("focusMinutes", self.focus_minutes),
            ("shortBreakMinutes", self.short_break_minutes),
            ("longBreakMinutes", self.long_break_minutes),
        ];
        for (field, value) in minutes {
            if value == 0 {
                return Err(PlanError::invalid_duration(field, "must be greater than 0"));
            }
        }
        if self.cycles_until_long_break < 2 {
            return Err(PlanError::invalid_duration(
                "cyclesUntilLongBreak",
                format!("must be at least 2, got {}", self.cycles_until_long_break),
            ));
        }
        Ok(())
    }

    pub fn focus_secs(&self) -> u64 {
        u64::from(self.focus_minutes) * 60
    }

    pub fn short_break_secs(&self) -> u64 {
        u64::from(self.short_break_minutes) * 60
    }

    pub fn long_break_secs(&self) -> u64 {
        u64::from(self.long_break_minutes) * 60
    }

    /// Full length of a phase in seconds. Idle and Paused report the focus
    /// length, which is what a fresh start would run.
    pub fn phase_secs(&self, phase: PomodoroPhase) -> u64 {
        match phase {
            PomodoroPhase::ShortBreak => self.short_break_secs(),
            PomodoroPhase::LongBreak => self.long_break_secs(),
            PomodoroPhase::Focus | PomodoroPhase::Idle | PomodoroPhase::Paused => self.focus_secs(),
        }
    }

    /// `max(1, floor(duration / focus))`.
    pub fn pomodoros_in(&self, duration_minutes: i64) -> u32 {
        if self.focus_minutes == 0 || duration_minutes <= 0 {
            return 1;
        }
        let count = duration_minutes / i64::from(self.focus_minutes);
        u32::try_from(count).unwrap_or(u32::MAX).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic_pomodoro() {
        let s = PomodoroSettings::default();
        assert_eq!(s, PomodoroSettings::new(25, 5, 15, 4));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn zero_minutes_rejected() {
        let err = PomodoroSettings::new(25, 0, 15, 4).validate().unwrap_err();
        assert_eq!(
            err,
            PlanError::InvalidDuration {
                field: "shortBreakMinutes".into(),
                message: "must be greater than 0".into(),
            }
        );
    }

    #[test]
    fn single_cycle_rejected() {
        assert!(PomodoroSettings::new(25, 5, 15, 1).validate().is_err());
    }

    #[test]
    fn pomodoro_count_floors_with_minimum_one() {
        let s = PomodoroSettings::default();
        assert_eq!(s.pomodoros_in(180), 7);
        assert_eq!(s.pomodoros_in(50), 2);
        assert_eq!(s.pomodoros_in(49), 1);
        assert_eq!(s.pomodoros_in(10), 1);
    }
}
