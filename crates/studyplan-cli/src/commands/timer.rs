use std::path::PathBuf;
use std::time::Duration;

use clap::Subcommand;
use studyplan_core::{CompletionTracker, Config, Event, PlanError, PomodoroEngine};

use super::{read_plan, write_plan};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run focus/break cycles against a real clock
    Run {
        /// Focus intervals to complete
        #[arg(long, default_value = "4")]
        cycles: u32,
        /// Milliseconds per timer second
        #[arg(long, default_value = "1000")]
        speed_ms: u64,
        /// Plan file holding the session to study
        #[arg(long, requires = "session")]
        plan: Option<PathBuf>,
        /// Session to run; its pomodoro count replaces --cycles
        #[arg(long, requires = "plan")]
        session: Option<String>,
    },
    /// Tick the timer synchronously and print the final state
    Simulate {
        /// Seconds to advance
        #[arg(long)]
        ticks: u64,
        /// Start the next phase whenever one completes
        #[arg(long)]
        auto: bool,
    },
}

fn emit(event: Option<Event>) -> Result<(), serde_json::Error> {
    if let Some(event) = event {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

/// Run until `cycles` focus intervals have completed. Breaks between them
/// start automatically; the trailing break is not run.
async fn drive(
    engine: &mut PomodoroEngine,
    cycles: u32,
    period: Duration,
) -> Result<(), serde_json::Error> {
    let mut interval = tokio::time::interval(period);
    interval.tick().await;

    emit(engine.start())?;
    while engine.completed_focus_count() < cycles {
        interval.tick().await;
        if let Some(event) = engine.tick() {
            emit(Some(event))?;
            if engine.completed_focus_count() < cycles {
                emit(engine.start())?;
            }
        }
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            cycles,
            speed_ms,
            plan,
            session,
        } => {
            let target = match (plan, session) {
                (Some(path), Some(id)) => {
                    let plan = read_plan(&path)?;
                    let session = plan
                        .session(&id)
                        .ok_or_else(|| PlanError::UnknownSession(id.clone()))?;
                    let cycles = session.pomodoro_count;
                    tracing::info!(session = %id, subject = %session.subject_name, cycles, "running session");
                    Some((path, plan, id, cycles))
                }
                _ => None,
            };

            let (settings, cycles) = match &target {
                Some((_, plan, _, cycles)) => (plan.pomodoro_settings, *cycles),
                None => (Config::load()?.pomodoro_settings(), cycles),
            };
            if cycles == 0 {
                return Err("--cycles must be at least 1".into());
            }

            let mut engine = PomodoroEngine::new(settings)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(drive(
                &mut engine,
                cycles,
                Duration::from_millis(speed_ms.max(1)),
            ))?;

            if let Some((path, mut plan, id, _)) = target {
                emit(CompletionTracker::new().complete(&mut plan, &id)?)?;
                write_plan(&path, &plan)?;
            }
            emit(Some(engine.snapshot()))?;
        }
        TimerAction::Simulate { ticks, auto } => {
            let settings = Config::load()?.pomodoro_settings();
            let mut engine = PomodoroEngine::new(settings)?;

            engine.start();
            for _ in 0..ticks {
                if engine.tick().is_some() && auto {
                    engine.start();
                }
            }
            println!("{}", serde_json::to_string_pretty(&engine.state())?);
        }
    }
    Ok(())
}
