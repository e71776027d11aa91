//! # Studyplan Core Library
//!
//! Core logic for building bimester study plans for Brazilian school grades
//! and running the Pomodoro sessions they contain. Everything here is a pure,
//! clock-free library: the caller supplies "now" and drives the timer with
//! `tick()`. The `studyplan-cli` binary is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Curriculum**: Built-in catalog of subjects per grade level
//! - **Availability**: Weekly study windows and their validation
//! - **Scheduler**: Deterministic priority-rotation session generator
//! - **Timer**: Pomodoro state machine that emits [`Event`]s
//! - **Progress**: Session completion and statistics
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CurriculumCatalog`]: Grade level to subject lookup
//! - [`ScheduleGenerator`]: Turns subjects and windows into [`StudySession`]s
//! - [`PomodoroEngine`]: Focus/break cycle state machine
//! - [`CompletionTracker`]: Marks sessions done and reports progress
//! - [`Config`]: Application configuration management

pub mod availability;
pub mod curriculum;
pub mod error;
pub mod events;
pub mod plan;
pub mod progress;
pub mod scheduler;
pub mod storage;
pub mod timer;

pub use availability::{AvailabilityDay, CapacityWarning, DayKey, ValidatedWindows};
pub use curriculum::{CurriculumCatalog, GradeEntry, PriorityTier, Subject};
pub use error::{ConfigError, CoreError, PlanError};
pub use events::Event;
pub use plan::{StudyPlan, StudySession};
pub use progress::{CompletionStats, CompletionTracker, PlanStats, SubjectProgress};
pub use scheduler::{
    PlanOutcome, PlanRequest, Rotation, ScheduleGenerator, BIMESTER_WEEKS, MAX_WEEKS,
};
pub use storage::Config;
pub use timer::{PomodoroEngine, PomodoroPhase, PomodoroSettings, PomodoroState};
