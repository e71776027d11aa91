//! Study schedule generator.
//!
//! Turns enabled subjects and validated weekly windows into a fixed,
//! multi-week list of study sessions:
//! - Each `(week, window)` slot gets exactly one session
//! - Slots rotate through the High, Medium and Low priority tiers
//! - Within a tier, subjects are picked round-robin
//! - Every enabled subject is scheduled at least once when there are at
//!   least as many slots as subjects
//! - Dates never fall before the plan's start date
//!
//! Generation is deterministic: identical inputs give identical sessions,
//! apart from the random session ids.

mod request;

pub use request::{PlanOutcome, PlanRequest};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::{DayKey, ValidatedWindows};
use crate::curriculum::{PriorityTier, Subject};
use crate::error::PlanError;
use crate::plan::StudySession;
use crate::timer::PomodoroSettings;

/// One academic bimester.
pub const BIMESTER_WEEKS: u32 = 8;

/// Longest horizon accepted by the generator: two school years.
pub const MAX_WEEKS: u32 = 104;

/// Tier order used for slot rotation: slot `i` draws from `TIER_ORDER[i % 3]`.
const TIER_ORDER: [PriorityTier; 3] = [PriorityTier::High, PriorityTier::Medium, PriorityTier::Low];

/// How a subject is picked inside the selected tier bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rotation {
    /// `bucket[k % bucket.len()]`, with `k` the number of earlier slots that
    /// drew from the same tier.
    #[default]
    PerBucket,
    /// `bucket[i % bucket.len()]`, with `i` the global slot index. Only
    /// reaches some members of a bucket whose length shares a factor with 3.
    FlatIndex,
}

/// Enabled subjects split by tier, as indices into `all`, in catalog order.
struct TierBuckets<'a> {
    all: Vec<&'a Subject>,
    tiers: [Vec<usize>; 3],
    every: Vec<usize>,
}

impl<'a> TierBuckets<'a> {
    fn new(subjects: &'a [Subject]) -> Self {
        let all: Vec<&Subject> = subjects.iter().filter(|s| s.enabled).collect();
        let tiers = TIER_ORDER.map(|tier| {
            all.iter()
                .enumerate()
                .filter(|(_, s)| s.priority_tier == tier)
                .map(|(idx, _)| idx)
                .collect::<Vec<_>>()
        });
        let every = (0..all.len()).collect();
        Self { all, tiers, every }
    }

    /// The bucket for a tier position, falling back to every enabled
    /// subject when that tier has none.
    fn bucket(&self, tier_pos: usize) -> &[usize] {
        let bucket = &self.tiers[tier_pos];
        if bucket.is_empty() {
            &self.every
        } else {
            bucket
        }
    }
}

/// Deterministic schedule generator.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    rotation: Rotation,
}

impl ScheduleGenerator {
    /// Generator with the per-bucket rotation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation(rotation: Rotation) -> Self {
        Self { rotation }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Generate sessions for `weeks` weeks starting at `start_date`.
    ///
    /// When there are at least as many slots as enabled subjects, and the
    /// slots left equal the subjects not yet scheduled, each remaining slot
    /// takes the first such subject instead of the rotation's pick.
    ///
    /// # Errors
    /// - `EmptyCurriculum` if no subject is enabled
    /// - `InvalidDuration` if the pomodoro settings are invalid or `weeks` is
    ///   0 or above [`MAX_WEEKS`]
    /// - `DateOutOfRange` if a session date falls outside the calendar
    pub fn generate(
        &self,
        subjects: &[Subject],
        windows: &ValidatedWindows,
        settings: &PomodoroSettings,
        weeks: u32,
        start_date: NaiveDate,
    ) -> Result<Vec<StudySession>, PlanError> {
        settings.validate()?;
        if weeks == 0 {
            return Err(PlanError::invalid_duration("weeks", "must be at least 1"));
        }
        if weeks > MAX_WEEKS {
            return Err(PlanError::invalid_duration(
                "weeks",
                format!("must be at most {MAX_WEEKS}"),
            ));
        }

        let buckets = TierBuckets::new(subjects);
        if buckets.all.is_empty() {
            return Err(PlanError::EmptyCurriculum);
        }

        let total_slots = weeks as usize * windows.len();
        let mut sessions = Vec::with_capacity(total_slots);
        let mut tier_draws = [0usize; 3];
        let mut scheduled = vec![false; buckets.all.len()];
        let mut unscheduled = buckets.all.len();
        let can_cover = total_slots >= unscheduled;

        let slots = (0..weeks).flat_map(move |week| windows.iter().map(move |w| (week, w)));
        for (i, (week, window)) in slots.enumerate() {
            let forced = if can_cover && unscheduled >= total_slots - i {
                scheduled.iter().position(|done| !done)
            } else {
                None
            };
            let idx = match forced {
                Some(idx) => {
                    let id = &buckets.all[idx].id;
                    tracing::trace!(slot = i, subject = %id, "coverage pick");
                    idx
                }
                None => {
                    let tier_pos = i % 3;
                    let bucket = buckets.bucket(tier_pos);
                    let pick = match self.rotation {
                        Rotation::PerBucket => tier_draws[tier_pos],
                        Rotation::FlatIndex => i,
                    };
                    tier_draws[tier_pos] += 1;
                    bucket[pick % bucket.len()]
                }
            };
            if !scheduled[idx] {
                scheduled[idx] = true;
                unscheduled -= 1;
            }
            let subject = buckets.all[idx];

            let date = session_date(start_date, window.day_key, week)
                .ok_or(PlanError::DateOutOfRange { start_date, weeks })?;
            let start_date_time = date.and_time(window.start_time);
            let end_date_time = date.and_time(window.end_time);
            let duration = (end_date_time - start_date_time).num_minutes();

            tracing::trace!(
                slot = i,
                week,
                day = %window.day_key,
                subject = %subject.id,
                "scheduled session"
            );

            sessions.push(StudySession {
                id: uuid::Uuid::new_v4().to_string(),
                subject_id: subject.id.clone(),
                subject_name: subject.name.clone(),
                week_index: week,
                day_key: window.day_key,
                start_date_time,
                end_date_time,
                pomodoro_count: settings.pomodoros_in(duration),
                completed: false,
                notes: None,
            });
        }

        tracing::debug!(
            sessions = sessions.len(),
            weeks,
            days_per_week = windows.len(),
            rotation = ?self.rotation,
            "generated study sessions"
        );
        Ok(sessions)
    }
}

/// Generate with the default generator. See [`ScheduleGenerator::generate`].
pub fn generate(
    subjects: &[Subject],
    windows: &ValidatedWindows,
    settings: &PomodoroSettings,
    weeks: u32,
    start_date: NaiveDate,
) -> Result<Vec<StudySession>, PlanError> {
    ScheduleGenerator::new().generate(subjects, windows, settings, weeks, start_date)
}

/// Date of `day` in week `week` of a plan starting at `start`, or `None`
/// past the ends of the calendar.
///
/// Week 0 is the calendar week (Monday-based) containing `start`. A weekday
/// that already passed in that week rolls forward by exactly 7 days, and the
/// whole column for that weekday keeps the same offset so later weeks never
/// land on a date already used.
pub fn session_date(start: NaiveDate, day: DayKey, week: u32) -> Option<NaiveDate> {
    let back = Duration::days(i64::from(start.weekday().num_days_from_monday()));
    let monday = start.checked_sub_signed(back)?;
    let mut first = monday.checked_add_signed(Duration::days(i64::from(day.days_from_monday())))?;
    if first < start {
        first = first.checked_add_signed(Duration::days(7))?;
    }
    first.checked_add_signed(Duration::weeks(i64::from(week)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::{validate, AvailabilityDay};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subject(id: &str, tier: PriorityTier) -> Subject {
        Subject::new(id, id, 2.0, tier, 3)
    }

    fn windows(days: &[DayKey]) -> ValidatedWindows {
        let rows: Vec<_> = days
            .iter()
            .map(|d| AvailabilityDay::new(*d, "19:00", "21:00").unwrap())
            .collect();
        validate(&rows).unwrap()
    }

    // 2025-03-05 is a Wednesday.
    const WEDNESDAY: (i32, u32, u32) = (2025, 3, 5);

    #[test]
    fn session_date_same_week_when_not_past() {
        let start = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2);
        assert_eq!(session_date(start, DayKey::Wednesday, 0), Some(start));
        assert_eq!(session_date(start, DayKey::Friday, 0), Some(date(2025, 3, 7)));
        assert_eq!(session_date(start, DayKey::Friday, 2), Some(date(2025, 3, 21)));
    }

    #[test]
    fn session_date_rolls_past_weekday_forward_one_week() {
        let start = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2);
        // Monday of that week is 2025-03-03, already past.
        assert_eq!(session_date(start, DayKey::Monday, 0), Some(date(2025, 3, 10)));
        assert_eq!(session_date(start, DayKey::Monday, 1), Some(date(2025, 3, 17)));
    }

    #[test]
    fn session_date_handles_sunday_start() {
        let sunday = date(2025, 3, 9);
        assert_eq!(session_date(sunday, DayKey::Sunday, 0), Some(sunday));
        assert_eq!(session_date(sunday, DayKey::Saturday, 0), Some(date(2025, 3, 15)));
    }

    #[test]
    fn session_date_is_none_past_the_calendar() {
        assert_eq!(session_date(NaiveDate::MAX, DayKey::Sunday, 1), None);
        assert_eq!(session_date(NaiveDate::MAX, DayKey::Monday, 8), None);
    }

    #[test]
    fn start_at_calendar_end_is_an_error() {
        let err = generate(
            &[subject("math", PriorityTier::High)],
            &windows(&[DayKey::Sunday]),
            &PomodoroSettings::default(),
            8,
            NaiveDate::MAX,
        )
        .unwrap_err();
        assert_eq!(err, PlanError::DateOutOfRange { start_date: NaiveDate::MAX, weeks: 8 });
    }

    #[test]
    fn weeks_above_cap_are_rejected() {
        let run = |weeks| {
            generate(
                &[subject("math", PriorityTier::High)],
                &windows(&[DayKey::Monday]),
                &PomodoroSettings::default(),
                weeks,
                date(2025, 3, 3),
            )
        };
        assert_eq!(run(MAX_WEEKS).unwrap().len(), MAX_WEEKS as usize);
        assert!(matches!(run(MAX_WEEKS + 1), Err(PlanError::InvalidDuration { .. })));
        assert!(matches!(run(u32::MAX), Err(PlanError::InvalidDuration { .. })));
    }

    #[test]
    fn one_session_per_slot_with_tier_rotation() {
        let subjects = vec![
            subject("math", PriorityTier::High),
            subject("history", PriorityTier::Medium),
            subject("arts", PriorityTier::Low),
        ];
        let sessions = generate(
            &subjects,
            &windows(&[DayKey::Monday, DayKey::Tuesday, DayKey::Wednesday]),
            &PomodoroSettings::default(),
            2,
            date(2025, 3, 3),
        )
        .unwrap();

        let ids: Vec<_> = sessions.iter().map(|s| s.subject_id.as_str()).collect();
        assert_eq!(ids, vec!["math", "history", "arts", "math", "history", "arts"]);
        assert!(sessions.iter().all(|s| s.pomodoro_count == 4));
        assert!(sessions.iter().all(|s| !s.completed));
    }

    #[test]
    fn empty_tier_falls_back_to_all_subjects() {
        let subjects = vec![
            subject("math", PriorityTier::High),
            subject("portuguese", PriorityTier::High),
            subject("history", PriorityTier::Medium),
        ];
        let w = windows(&[DayKey::Monday, DayKey::Wednesday, DayKey::Friday]);
        let settings = PomodoroSettings::default();
        let start = date(2025, 3, 3);

        // i=2 and i=5 draw from the empty Low tier: the first and second
        // enabled subjects.
        let sessions = generate(&subjects, &w, &settings, 2, start).unwrap();
        let ids: Vec<_> = sessions.iter().map(|s| s.subject_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["math", "history", "math", "portuguese", "history", "portuguese"]
        );

        // Flat index: all[2 % 3] and all[5 % 3].
        let sessions = ScheduleGenerator::with_rotation(Rotation::FlatIndex)
            .generate(&subjects, &w, &settings, 2, start)
            .unwrap();
        let ids: Vec<_> = sessions.iter().map(|s| s.subject_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["math", "history", "history", "portuguese", "history", "history"]
        );
    }

    #[test]
    fn per_bucket_rotation_reaches_every_high_subject() {
        let subjects = vec![
            subject("a", PriorityTier::High),
            subject("b", PriorityTier::High),
            subject("c", PriorityTier::High),
            subject("m", PriorityTier::Medium),
            subject("l", PriorityTier::Low),
        ];
        let w = windows(&[DayKey::Monday, DayKey::Wednesday, DayKey::Friday]);
        let settings = PomodoroSettings::default();
        let start = date(2025, 3, 3);

        let ids = |rotation| {
            ScheduleGenerator::with_rotation(rotation)
                .generate(&subjects, &w, &settings, 3, start)
                .unwrap()
                .into_iter()
                .map(|s| s.subject_id)
                .collect::<Vec<_>>()
        };

        assert_eq!(ScheduleGenerator::new().rotation(), Rotation::PerBucket);
        assert_eq!(
            ids(Rotation::PerBucket),
            vec!["a", "m", "l", "b", "m", "l", "c", "m", "l"]
        );
        // High slots 0, 3 and 6 all map to a; b and c only get the last two slots.
        assert_eq!(
            ids(Rotation::FlatIndex),
            vec!["a", "m", "l", "a", "m", "l", "a", "b", "c"]
        );
    }

    #[test]
    fn coverage_pick_fills_tail_slots_with_unscheduled_subjects() {
        let subjects = vec![
            subject("h0", PriorityTier::High),
            subject("h1", PriorityTier::High),
            subject("h2", PriorityTier::High),
            subject("h3", PriorityTier::High),
        ];
        let w = windows(&[DayKey::Monday, DayKey::Tuesday, DayKey::Wednesday, DayKey::Thursday]);
        for rotation in [Rotation::PerBucket, Rotation::FlatIndex] {
            let sessions = ScheduleGenerator::with_rotation(rotation)
                .generate(&subjects, &w, &PomodoroSettings::default(), 1, date(2025, 3, 3))
                .unwrap();
            let ids: Vec<_> = sessions.iter().map(|s| s.subject_id.as_str()).collect();
            assert_eq!(ids, vec!["h0", "h1", "h2", "h3"], "{rotation:?}");
        }
    }

    #[test]
    fn fewer_slots_than_subjects_follows_rotation() {
        let subjects = vec![
            subject("a", PriorityTier::High),
            subject("b", PriorityTier::High),
            subject("m", PriorityTier::Medium),
        ];
        let sessions = generate(
            &subjects,
            &windows(&[DayKey::Saturday]),
            &PomodoroSettings::default(),
            2,
            date(2025, 3, 3),
        )
        .unwrap();
        let ids: Vec<_> = sessions.iter().map(|s| s.subject_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "m"]);
    }

    #[test]
    fn disabled_subjects_never_scheduled() {
        let mut off = subject("religion", PriorityTier::Low);
        off.enabled = false;
        let subjects = vec![subject("math", PriorityTier::High), off];
        let sessions = generate(
            &subjects,
            &windows(&[DayKey::Monday, DayKey::Tuesday, DayKey::Wednesday]),
            &PomodoroSettings::default(),
            1,
            date(2025, 3, 3),
        )
        .unwrap();
        assert!(sessions.iter().all(|s| s.subject_id == "math"));
    }

    #[test]
    fn no_enabled_subject_is_an_error() {
        let mut off = subject("math", PriorityTier::High);
        off.enabled = false;
        let err = generate(
            &[off],
            &windows(&[DayKey::Monday]),
            &PomodoroSettings::default(),
            8,
            date(2025, 3, 3),
        )
        .unwrap_err();
        assert_eq!(err, PlanError::EmptyCurriculum);
    }

    #[test]
    fn zero_weeks_is_rejected() {
        let err = generate(
            &[subject("math", PriorityTier::High)],
            &windows(&[DayKey::Monday]),
            &PomodoroSettings::default(),
            0,
            date(2025, 3, 3),
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidDuration { .. }));
    }

    #[test]
    fn short_window_still_gets_one_pomodoro() {
        let rows = vec![AvailabilityDay::new(DayKey::Monday, "19:00", "19:10").unwrap()];
        let sessions = generate(
            &[subject("math", PriorityTier::High)],
            &validate(&rows).unwrap(),
            &PomodoroSettings::default(),
            1,
            date(2025, 3, 3),
        )
        .unwrap();
        assert_eq!(sessions[0].pomodoro_count, 1);
        assert_eq!(sessions[0].duration_minutes(), 10);
    }

    #[test]
    fn rotation_parses_kebab_case() {
        let r: Rotation = serde_json::from_str("\"per-bucket\"").unwrap();
        assert_eq!(r, Rotation::PerBucket);
        let r: Rotation = serde_json::from_str("\"flat-index\"").unwrap();
        assert_eq!(r, Rotation::FlatIndex);
        assert_eq!(Rotation::default(), Rotation::PerBucket);
    }
}
