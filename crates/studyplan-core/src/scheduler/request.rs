//! Whole-plan generation from the learner's current selections.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{ScheduleGenerator, BIMESTER_WEEKS};
use crate::availability::{self, AvailabilityDay, CapacityWarning};
use crate::curriculum::CurriculumCatalog;
use crate::error::PlanError;
use crate::plan::StudyPlan;
use crate::timer::PomodoroSettings;

/// Everything the learner selected on the planning form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub grade_level: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    pub availability: Vec<AvailabilityDay>,
    #[serde(default)]
    pub pomodoro_settings: PomodoroSettings,
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    /// When the plan is being created. Sessions never precede this date.
    pub created_at: NaiveDateTime,
    /// First day of the horizon; defaults to the creation date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Subject ids to switch on regardless of the catalog default.
    #[serde(default)]
    pub enable_subjects: Vec<String>,
    /// Subject ids to switch off.
    #[serde(default)]
    pub disable_subjects: Vec<String>,
}

fn default_weeks() -> u32 {
    BIMESTER_WEEKS
}

impl PlanRequest {
    /// A request with the default week, default pomodoro settings and a
    /// bimester horizon.
    pub fn new(grade_level: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            grade_level: grade_level.into(),
            name: None,
            goals: None,
            availability: availability::default_week(),
            pomodoro_settings: PomodoroSettings::default(),
            weeks: BIMESTER_WEEKS,
            created_at,
            start_date: None,
            enable_subjects: Vec::new(),
            disable_subjects: Vec::new(),
        }
    }

    /// Effective first day: the requested start, but never before creation.
    pub fn effective_start(&self) -> NaiveDate {
        let created = self.created_at.date();
        self.start_date.map_or(created, |d| d.max(created))
    }
}

/// A generated plan plus the advisory capacity check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutcome {
    pub plan: StudyPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_warning: Option<CapacityWarning>,
}

impl ScheduleGenerator {
    /// Look up the curriculum, apply subject overrides, validate the
    /// availability form and generate a complete, active plan.
    pub fn build_plan(
        &self,
        catalog: &CurriculumCatalog,
        request: &PlanRequest,
    ) -> Result<PlanOutcome, PlanError> {
        let grade = catalog
            .entry(&request.grade_level)
            .ok_or_else(|| PlanError::UnknownGradeLevel(request.grade_level.clone()))?;
        let mut subjects = grade.subjects.clone();

        for (ids, enabled) in [(&request.enable_subjects, true), (&request.disable_subjects, false)] {
            for id in ids {
                let subject = subjects
                    .iter_mut()
                    .find(|s| &s.id == id)
                    .ok_or_else(|| PlanError::UnknownSubject(id.clone()))?;
                subject.enabled = enabled;
            }
        }

        let windows = availability::validate(&request.availability)?;
        let sessions = self.generate(
            &subjects,
            &windows,
            &request.pomodoro_settings,
            request.weeks,
            request.effective_start(),
        )?;

        let capacity_warning = availability::capacity_check(&subjects, &windows);
        if let Some(warning) = capacity_warning {
            tracing::warn!(
                required_minutes = warning.required_minutes,
                available_minutes = warning.available_minutes,
                "weekly study target exceeds available time"
            );
        }

        let plan = StudyPlan {
            id: uuid::Uuid::new_v4().to_string(),
            name: request
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("Plano de {}", grade.label)),
            grade_level: grade.code.clone(),
            subjects: subjects.into_iter().filter(|s| s.enabled).collect(),
            availability: request.availability.clone(),
            pomodoro_settings: request.pomodoro_settings,
            sessions,
            created_at: request.created_at,
            active: true,
            goals: request.goals.clone(),
        };

        tracing::info!(
            plan_id = %plan.id,
            grade = %plan.grade_level,
            sessions = plan.sessions.len(),
            "study plan generated"
        );

        Ok(PlanOutcome {
            plan,
            capacity_warning,
        })
    }
}
