//! Session completion tracking and progress statistics.
//!
//! The tracker is the only writer of a session's `completed` and `notes`
//! fields. Statistics are pure reads over a [`StudyPlan`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::events::Event;
use crate::plan::{StudyPlan, StudySession};

/// Completed vs. total sessions for some slice of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub completed: u32,
    pub total: u32,
    /// 0.0 ..= 100.0; 0 when there are no sessions.
    pub percentage: f64,
}

impl CompletionStats {
    fn from_sessions<'a>(sessions: impl IntoIterator<Item = &'a StudySession>) -> Self {
        let (completed, total) = sessions
            .into_iter()
            .fold((0u32, 0u32), |(done, all), s| (done + u32::from(s.completed), all + 1));
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(completed) / f64::from(total) * 100.0
        };
        Self {
            completed,
            total,
            percentage,
        }
    }
}

/// Planned and completed work for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProgress {
    pub subject_id: String,
    pub subject_name: String,
    pub sessions: u32,
    pub completed_sessions: u32,
    pub planned_minutes: i64,
    pub completed_minutes: i64,
    pub planned_pomodoros: u32,
}

/// Whole-plan report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStats {
    pub overall: CompletionStats,
    /// Indexed by week.
    pub by_week: Vec<CompletionStats>,
    /// In the plan's subject order.
    pub by_subject: Vec<SubjectProgress>,
}

/// Records completion and derives progress statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionTracker;

impl CompletionTracker {
    pub fn new() -> Self {
        Self
    }

    /// Mark a session completed.
    ///
    /// Idempotent: returns `Ok(Some(SessionCompleted))` the first time and
    /// `Ok(None)` if the session was already completed.
    pub fn complete(&self, plan: &mut StudyPlan, session_id: &str) -> Result<Option<Event>, PlanError> {
        let session = find_mut(plan, session_id)?;
        if session.completed {
            return Ok(None);
        }
        session.completed = true;
        tracing::debug!(session_id, week = session.week_index, "session completed");
        Ok(Some(Event::SessionCompleted {
            session_id: session.id.clone(),
            week_index: session.week_index,
        }))
    }

    /// Clear a completion flag. Idempotent like [`complete`](Self::complete).
    pub fn uncomplete(&self, plan: &mut StudyPlan, session_id: &str) -> Result<Option<Event>, PlanError> {
        let session = find_mut(plan, session_id)?;
        if !session.completed {
            return Ok(None);
        }
        session.completed = false;
        Ok(Some(Event::SessionReopened {
            session_id: session.id.clone(),
        }))
    }

    /// Replace a session's notes; blank notes are cleared.
    pub fn set_notes(
        &self,
        plan: &mut StudyPlan,
        session_id: &str,
        notes: Option<String>,
    ) -> Result<(), PlanError> {
        let session = find_mut(plan, session_id)?;
        session.notes = notes.filter(|n| !n.trim().is_empty());
        Ok(())
    }

    pub fn weekly_stats(&self, plan: &StudyPlan, week_index: u32) -> CompletionStats {
        CompletionStats::from_sessions(plan.sessions_in_week(week_index))
    }

    /// Sessions on a calendar date, earliest first.
    pub fn sessions_on<'a>(&self, plan: &'a StudyPlan, date: NaiveDate) -> Vec<&'a StudySession> {
        let mut sessions: Vec<_> = plan.sessions.iter().filter(|s| s.date() == date).collect();
        sessions.sort_by_key(|s| s.start_date_time);
        sessions
    }

    pub fn daily_stats(&self, plan: &StudyPlan, date: NaiveDate) -> CompletionStats {
        CompletionStats::from_sessions(self.sessions_on(plan, date))
    }

    pub fn plan_stats(&self, plan: &StudyPlan) -> PlanStats {
        let by_week = (0..plan.week_count())
            .map(|w| self.weekly_stats(plan, w))
            .collect();

        let by_subject = plan
            .subjects
            .iter()
            .map(|subject| {
                let mut progress = SubjectProgress {
                    subject_id: subject.id.clone(),
                    subject_name: subject.name.clone(),
                    sessions: 0,
                    completed_sessions: 0,
                    planned_minutes: 0,
                    completed_minutes: 0,
                    planned_pomodoros: 0,
                };
                for s in plan.sessions.iter().filter(|s| s.subject_id == subject.id) {
                    progress.sessions += 1;
                    progress.planned_minutes += s.duration_minutes();
                    progress.planned_pomodoros += s.pomodoro_count;
                    if s.completed {
                        progress.completed_sessions += 1;
                        progress.completed_minutes += s.duration_minutes();
                    }
                }
                progress
            })
            .collect();

        PlanStats {
            overall: CompletionStats::from_sessions(&plan.sessions),
            by_week,
            by_subject,
        }
    }
}

fn find_mut<'a>(plan: &'a mut StudyPlan, session_id: &str) -> Result<&'a mut StudySession, PlanError> {
    plan.session_mut(session_id)
        .ok_or_else(|| PlanError::UnknownSession(session_id.to_string()))
}
