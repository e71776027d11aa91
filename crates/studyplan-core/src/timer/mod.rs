mod engine;
mod settings;

pub use engine::{PomodoroEngine, PomodoroPhase, PomodoroState};
pub use settings::PomodoroSettings;
