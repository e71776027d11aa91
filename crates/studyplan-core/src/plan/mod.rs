//! Study plan records.
//!
//! A [`StudyPlan`] is produced once by the schedule generator and is then
//! only touched by the completion tracker. Everything here is plain data and
//! serializes to camelCase JSON for the host application.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::availability::{AvailabilityDay, DayKey};
use crate::curriculum::Subject;
use crate::timer::PomodoroSettings;

/// One scheduled study block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub week_index: u32,
    pub day_key: DayKey,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
    pub pomodoro_count: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StudySession {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_date_time - self.start_date_time).num_minutes()
    }

    pub fn date(&self) -> NaiveDate {
        self.start_date_time.date()
    }

    /// Half-open interval overlap; back-to-back sessions do not overlap.
    pub fn overlaps(&self, other: &StudySession) -> bool {
        self.start_date_time < other.end_date_time && other.start_date_time < self.end_date_time
    }
}

/// A generated multi-week plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub id: String,
    pub name: String,
    pub grade_level: String,
    /// Enabled subjects at generation time.
    pub subjects: Vec<Subject>,
    /// The availability form as submitted.
    pub availability: Vec<AvailabilityDay>,
    pub pomodoro_settings: PomodoroSettings,
    pub sessions: Vec<StudySession>,
    pub created_at: NaiveDateTime,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
}

impl StudyPlan {
    pub fn session(&self, session_id: &str) -> Option<&StudySession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    pub fn session_mut(&mut self, session_id: &str) -> Option<&mut StudySession> {
        self.sessions.iter_mut().find(|s| s.id == session_id)
    }

    pub fn sessions_in_week(&self, week_index: u32) -> impl Iterator<Item = &StudySession> {
        self.sessions.iter().filter(move |s| s.week_index == week_index)
    }

    /// Number of weeks the sessions span (highest week index + 1).
    pub fn week_count(&self) -> u32 {
        self.sessions
            .iter()
            .map(|s| s.week_index + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn session(day: u32, start: (u32, u32), end: (u32, u32)) -> StudySession {
        let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        StudySession {
            id: format!("s-{day}-{}", start.0),
            subject_id: "matematica".into(),
            subject_name: "Matemática".into(),
            week_index: 0,
            day_key: DayKey::from(chrono::Datelike::weekday(&date)),
            start_date_time: date.and_time(NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap()),
            end_date_time: date.and_time(NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap()),
            pomodoro_count: 1,
            completed: false,
            notes: None,
        }
    }

    #[test]
    fn duration_and_date() {
        let s = session(3, (19, 0), (21, 30));
        assert_eq!(s.duration_minutes(), 150);
        assert_eq!(s.date(), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(s.day_key, DayKey::Monday);
    }

    #[test]
    fn overlap_is_half_open() {
        let a = session(3, (19, 0), (20, 0));
        let b = session(3, (20, 0), (21, 0));
        let c = session(3, (19, 30), (20, 30));
        let d = session(4, (19, 0), (20, 0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn session_json_is_camel_case() {
        let json = serde_json::to_value(session(3, (19, 0), (20, 0))).unwrap();
        assert_eq!(json["subjectId"], "matematica");
        assert_eq!(json["startDateTime"], "2025-03-03T19:00:00");
        assert_eq!(json["dayKey"], "monday");
        assert!(json.get("notes").is_none());
    }
}
