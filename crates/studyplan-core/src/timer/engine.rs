//! Pomodoro engine implementation.
//!
//! The engine is a pure state machine. It holds no timer and spawns nothing:
//! the host delivers one `tick()` per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Focus -> (ShortBreak | LongBreak) -> Focus -> ...
//!           \______ Paused ______/
//! ```
//!
//! The engine stops at every phase boundary and waits for the next `start()`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PomodoroEngine::new(PomodoroSettings::default())?;
//! engine.start();
//! // Once per second:
//! if let Some(event) = engine.tick() { /* phase finished */ }
//! ```

use serde::{Deserialize, Serialize};

use super::settings::PomodoroSettings;
use crate::error::PlanError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PomodoroPhase {
    Idle,
    Focus,
    ShortBreak,
    LongBreak,
    Paused,
}

impl PomodoroPhase {
    /// Phases that count down.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Focus | Self::ShortBreak | Self::LongBreak)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
            Self::Paused => "Paused",
        }
    }
}

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroState {
    pub phase: PomodoroPhase,
    pub remaining_seconds: u64,
    pub cycle_index: u32,
    pub is_running: bool,
    pub completed_focus_count: u32,
}

/// Focus/break cycle state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    settings: PomodoroSettings,
    phase: PomodoroPhase,
    /// Phase to return to on `resume()`. Only set while paused.
    #[serde(default)]
    paused_from: Option<PomodoroPhase>,
    remaining_secs: u64,
    cycle_index: u32,
    is_running: bool,
    #[serde(default)]
    completed_focus_count: u32,
}

impl PomodoroEngine {
    /// Create an idle engine with a full focus interval ready.
    ///
    /// Fails with `InvalidDuration` if any duration is zero or the long
    /// break comes every fewer than 2 cycles.
    pub fn new(settings: PomodoroSettings) -> Result<Self, PlanError> {
        settings.validate()?;
        Ok(Self {
            settings,
            phase: PomodoroPhase::Idle,
            paused_from: None,
            remaining_secs: settings.focus_secs(),
            cycle_index: 1,
            is_running: false,
            completed_focus_count: 0,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn cycle_index(&self) -> u32 {
        self.cycle_index
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_focus_count(&self) -> u32 {
        self.completed_focus_count
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn state(&self) -> PomodoroState {
        PomodoroState {
            phase: self.phase,
            remaining_seconds: self.remaining_secs,
            cycle_index: self.cycle_index,
            is_running: self.is_running,
            completed_focus_count: self.completed_focus_count,
        }
    }

    /// The phase whose clock is shown: the paused phase while paused.
    pub fn display_phase(&self) -> PomodoroPhase {
        match self.phase {
            PomodoroPhase::Paused => self.paused_from.unwrap_or(PomodoroPhase::Focus),
            other => other,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.settings.phase_secs(self.display_phase())
    }

    /// 0.0 .. 100.0 progress within the current phase.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (total.saturating_sub(self.remaining_secs)) as f64 / total as f64 * 100.0
    }

    /// Remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            display_phase: self.display_phase(),
            remaining: self.format_remaining(),
            progress_pct: self.progress_pct(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the first focus interval, or continue a phase the engine
    /// stopped at. From `Paused` this behaves like `resume()`.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            PomodoroPhase::Idle => {
                self.phase = PomodoroPhase::Focus;
                self.remaining_secs = self.settings.focus_secs();
                self.is_running = true;
                Some(self.started_event())
            }
            PomodoroPhase::Paused => self.resume(),
            _ if self.is_running => None, // Already running.
            _ => {
                self.is_running = true;
                Some(self.started_event())
            }
        }
    }

    /// Advance the clock by one second. Returns `Some(Event::PhaseCompleted)`
    /// when the phase runs out.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let completed = self.phase;
        let next = self.finish_phase(completed);
        Some(Event::PhaseCompleted {
            completed,
            next,
            cycle_index: self.cycle_index,
            next_duration_secs: self.remaining_secs,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running || !self.phase.is_active() {
            return None;
        }
        self.paused_from = Some(self.phase);
        self.phase = PomodoroPhase::Paused;
        self.is_running = false;
        Some(Event::PhasePaused {
            phase: self.display_phase(),
            remaining_secs: self.remaining_secs,
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.phase != PomodoroPhase::Paused {
            return None;
        }
        self.phase = self.paused_from.take().unwrap_or(PomodoroPhase::Focus);
        self.is_running = true;
        Some(Event::PhaseResumed {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
        })
    }

    /// End the current phase now, with the same transition as running out.
    /// Does nothing while idle.
    pub fn skip(&mut self) -> Option<Event> {
        let skipped = match self.phase {
            PomodoroPhase::Idle => return None,
            PomodoroPhase::Paused => self.paused_from.take().unwrap_or(PomodoroPhase::Focus),
            active => active,
        };
        self.phase = skipped;
        let next = self.finish_phase(skipped);
        Some(Event::PhaseSkipped {
            skipped,
            next,
            cycle_index: self.cycle_index,
        })
    }

    /// Back to a fresh idle engine, from any phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = PomodoroPhase::Idle;
        self.paused_from = None;
        self.remaining_secs = self.settings.focus_secs();
        self.cycle_index = 1;
        self.is_running = false;
        self.completed_focus_count = 0;
        Some(Event::TimerReset)
    }

    /// Swap durations; the engine is reset.
    pub fn set_settings(&mut self, settings: PomodoroSettings) -> Result<(), PlanError> {
        settings.validate()?;
        self.settings = settings;
        self.reset();
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn started_event(&self) -> Event {
        Event::PhaseStarted {
            phase: self.phase,
            cycle_index: self.cycle_index,
            duration_secs: self.remaining_secs,
        }
    }

    /// Move from an active phase to the next one and stop.
    fn finish_phase(&mut self, from: PomodoroPhase) -> PomodoroPhase {
        let next = match from {
            PomodoroPhase::Focus => {
                self.completed_focus_count += 1;
                if self.cycle_index % self.settings.cycles_until_long_break == 0 {
                    PomodoroPhase::LongBreak
                } else {
                    PomodoroPhase::ShortBreak
                }
            }
            PomodoroPhase::ShortBreak | PomodoroPhase::LongBreak => {
                self.cycle_index += 1;
                PomodoroPhase::Focus
            }
            PomodoroPhase::Idle | PomodoroPhase::Paused => return self.phase,
        };
        self.phase = next;
        self.remaining_secs = self.settings.phase_secs(next);
        self.is_running = false;
        next
    }
}
