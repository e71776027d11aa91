//! Integration tests for the plan workflow.
//!
//! Covers catalog lookup through generation, completion tracking and
//! JSON persistence of the resulting plan.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use studyplan_core::availability::{self, AvailabilityDay};
use studyplan_core::{
    CompletionTracker, CurriculumCatalog, DayKey, Event, PlanError, PlanRequest, PomodoroSettings,
    PriorityTier, ScheduleGenerator, StudyPlan, Subject,
};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn mon_wed_fri() -> Vec<AvailabilityDay> {
    [DayKey::Monday, DayKey::Wednesday, DayKey::Friday]
        .into_iter()
        .map(|d| AvailabilityDay::new(d, "18:00", "19:30").unwrap())
        .collect()
}

#[test]
fn test_every_subject_is_covered_over_a_bimester() {
    let subjects = vec![
        Subject::new("matematica", "Matemática", 4.0, PriorityTier::High, 4),
        Subject::new("portugues", "Português", 4.0, PriorityTier::High, 3),
        Subject::new("historia", "História", 2.0, PriorityTier::Medium, 2),
    ];
    let windows = availability::validate(&mon_wed_fri()).unwrap();
    let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    let sessions = ScheduleGenerator::new()
        .generate(&subjects, &windows, &PomodoroSettings::default(), 8, start)
        .unwrap();

    assert_eq!(sessions.len(), 24);
    let seen: HashSet<&str> = sessions.iter().map(|s| s.subject_id.as_str()).collect();
    assert_eq!(seen.len(), 3);
    // 90 minute windows at 25 minutes per pomodoro.
    assert!(sessions.iter().all(|s| s.pomodoro_count == 3));
}

#[test]
fn test_default_plan_covers_every_builtin_subject() {
    let catalog = CurriculumCatalog::builtin();
    let created = at(2025, 3, 3, 9);

    for (code, _) in catalog.grades() {
        for availability in [None, Some(mon_wed_fri())] {
            let mut request = PlanRequest::new(code, created);
            if let Some(days) = availability {
                request.availability = days;
            }
            let plan = ScheduleGenerator::new()
                .build_plan(&catalog, &request)
                .unwrap()
                .plan;

            let seen: HashSet<&str> = plan.sessions.iter().map(|s| s.subject_id.as_str()).collect();
            for subject in &plan.subjects {
                assert!(
                    seen.contains(subject.id.as_str()),
                    "{code}: {} never scheduled over {} sessions",
                    subject.id,
                    plan.sessions.len()
                );
            }
        }
    }
}

#[test]
fn test_past_weekday_rolls_forward_one_week() {
    // Wednesday: Monday of this week has already passed.
    let created = at(2025, 3, 5, 12);
    let mut request = PlanRequest::new("6-ano", created);
    request.availability = mon_wed_fri();

    let plan = ScheduleGenerator::new()
        .build_plan(&CurriculumCatalog::builtin(), &request)
        .unwrap()
        .plan;

    let first_monday = plan
        .sessions
        .iter()
        .find(|s| s.week_index == 0 && s.day_key == DayKey::Monday)
        .unwrap();
    assert_eq!(first_monday.date(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    let first_wednesday = plan
        .sessions
        .iter()
        .find(|s| s.week_index == 0 && s.day_key == DayKey::Wednesday)
        .unwrap();
    assert_eq!(first_wednesday.date(), created.date());

    // Later weeks keep the same offset.
    let monday_w1 = plan
        .sessions
        .iter()
        .find(|s| s.week_index == 1 && s.day_key == DayKey::Monday)
        .unwrap();
    assert_eq!(monday_w1.date() - first_monday.date(), Duration::days(7));

    assert!(plan.sessions.iter().all(|s| s.date() >= created.date()));
}

#[test]
fn test_generation_errors() {
    let catalog = CurriculumCatalog::builtin();
    let generator = ScheduleGenerator::new();
    let created = at(2025, 3, 3, 9);

    let mut request = PlanRequest::new("6-ano", created);
    request.availability = vec![AvailabilityDay::new(DayKey::Monday, "19:00", "22:00")
        .unwrap()
        .disabled()];
    assert_eq!(
        generator.build_plan(&catalog, &request).unwrap_err(),
        PlanError::EmptyAvailability
    );

    let mut request = PlanRequest::new("6-ano", created);
    request.availability = vec![AvailabilityDay::new(DayKey::Monday, "22:00", "19:00").unwrap()];
    match generator.build_plan(&catalog, &request).unwrap_err() {
        PlanError::InvalidWindow { day, .. } => assert_eq!(day, "monday"),
        other => panic!("unexpected error: {other}"),
    }

    let mut request = PlanRequest::new("6-ano", created);
    request.pomodoro_settings = PomodoroSettings::new(0, 5, 15, 4);
    assert!(matches!(
        generator.build_plan(&catalog, &request).unwrap_err(),
        PlanError::InvalidDuration { .. }
    ));

    let mut request = PlanRequest::new("6-ano", created);
    request.disable_subjects = catalog
        .lookup("6-ano")
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(
        generator.build_plan(&catalog, &request).unwrap_err(),
        PlanError::EmptyCurriculum
    );
}

#[test]
fn test_completion_workflow_and_persistence() {
    let created = at(2025, 3, 3, 8);
    let mut plan = ScheduleGenerator::new()
        .build_plan(&CurriculumCatalog::builtin(), &PlanRequest::new("9-ano", created))
        .unwrap()
        .plan;
    let tracker = CompletionTracker::new();

    let week0: Vec<String> = plan.sessions_in_week(0).map(|s| s.id.clone()).collect();
    for id in &week0 {
        let event = tracker.complete(&mut plan, id).unwrap();
        assert!(matches!(event, Some(Event::SessionCompleted { week_index: 0, .. })));
    }
    // Repeating a completion changes nothing.
    assert!(tracker.complete(&mut plan, &week0[0]).unwrap().is_none());

    let week = tracker.weekly_stats(&plan, 0);
    assert_eq!(week.completed, week.total);
    assert!((week.percentage - 100.0).abs() < 1e-9);

    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("\"gradeLevel\":\"9-ano\""));
    assert!(json.contains("\"pomodoroCount\""));
    let restored: StudyPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, plan);

    let stats = tracker.plan_stats(&restored);
    assert_eq!(stats.overall.completed as usize, week0.len());
    assert_eq!(stats.by_week[1].completed, 0);
}

#[test]
fn test_custom_catalog() {
    let catalog = CurriculumCatalog::from_entries(vec![studyplan_core::GradeEntry {
        code: "vestibular".into(),
        label: "Pré-vestibular".into(),
        subjects: vec![
            Subject::new("fisica", "Física", 3.0, PriorityTier::High, 5),
            Subject::new("quimica", "Química", 3.0, PriorityTier::High, 4),
        ],
    }])
    .unwrap();

    let mut request = PlanRequest::new("Pré-vestibular", at(2025, 8, 4, 7));
    request.weeks = 2;
    let outcome = ScheduleGenerator::new().build_plan(&catalog, &request).unwrap();
    assert_eq!(outcome.plan.grade_level, "vestibular");
    assert_eq!(outcome.plan.sessions.len(), 12);
    assert!(outcome.capacity_warning.is_none());
}
