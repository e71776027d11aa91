use serde::{Deserialize, Serialize};

use crate::timer::{PomodoroPhase, PomodoroState};

/// Every state change in the engine and tracker produces an Event.
///
/// Events carry no wall-clock timestamp; the host stamps them if it needs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PhaseStarted {
        phase: PomodoroPhase,
        cycle_index: u32,
        duration_secs: u64,
    },
    PhasePaused {
        phase: PomodoroPhase,
        remaining_secs: u64,
    },
    PhaseResumed {
        phase: PomodoroPhase,
        remaining_secs: u64,
    },
    /// A phase ran out; the engine stopped at the start of `next`.
    PhaseCompleted {
        completed: PomodoroPhase,
        next: PomodoroPhase,
        cycle_index: u32,
        next_duration_secs: u64,
    },
    PhaseSkipped {
        skipped: PomodoroPhase,
        next: PomodoroPhase,
        cycle_index: u32,
    },
    TimerReset,
    StateSnapshot {
        state: PomodoroState,
        display_phase: PomodoroPhase,
        remaining: String,
        progress_pct: f64,
    },
    /// A study session was marked completed for the first time.
    SessionCompleted {
        session_id: String,
        week_index: u32,
    },
    SessionReopened {
        session_id: String,
    },
}
