use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use studyplan_core::{CompletionTracker, Config, CurriculumCatalog};

use super::{read_plan, write_plan};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate a plan from the configured availability and pomodoro settings
    Generate {
        /// Grade code or label; defaults to planning.default_grade
        #[arg(long)]
        grade: Option<String>,
        /// First day of the plan (YYYY-MM-DD); never earlier than today
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Number of weeks; defaults to planning.weeks
        #[arg(long)]
        weeks: Option<u32>,
        /// Plan name
        #[arg(long)]
        name: Option<String>,
        /// Free-text goals
        #[arg(long)]
        goals: Option<String>,
        /// Switch on a subject that is off by default (repeatable)
        #[arg(long = "enable")]
        enable: Vec<String>,
        /// Switch off a subject (repeatable)
        #[arg(long = "disable")]
        disable: Vec<String>,
        /// Write the plan to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show completion statistics
    Stats {
        #[arg(long)]
        plan: PathBuf,
        /// Only this week (0-based)
        #[arg(long)]
        week: Option<u32>,
    },
    /// Mark a session completed
    Complete {
        #[arg(long)]
        plan: PathBuf,
        /// Session ID
        id: String,
        /// Reopen the session instead
        #[arg(long)]
        undo: bool,
        /// Attach notes to the session
        #[arg(long)]
        notes: Option<String>,
    },
    /// List the sessions of a day
    Today {
        #[arg(long)]
        plan: PathBuf,
        /// Day to list (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Generate {
            grade,
            start,
            weeks,
            name,
            goals,
            enable,
            disable,
            out,
        } => {
            let config = Config::load()?;
            let mut request = config.plan_request(grade.as_deref(), Local::now().naive_local());
            request.start_date = start;
            request.name = name;
            request.goals = goals;
            request.enable_subjects = enable;
            request.disable_subjects = disable;
            if let Some(weeks) = weeks {
                request.weeks = weeks;
            }

            let outcome = config
                .generator()
                .build_plan(&CurriculumCatalog::builtin(), &request)?;
            if let Some(warning) = outcome.capacity_warning {
                eprintln!(
                    "warning: subjects ask for {} min/week but only {} min are available ({} min short)",
                    warning.required_minutes,
                    warning.available_minutes,
                    warning.shortfall_minutes()
                );
            }

            match out {
                Some(path) => {
                    write_plan(&path, &outcome.plan)?;
                    println!(
                        "plan {} written to {} ({} sessions)",
                        outcome.plan.id,
                        path.display(),
                        outcome.plan.sessions.len()
                    );
                }
                None => println!("{}", serde_json::to_string_pretty(&outcome.plan)?),
            }
        }
        PlanAction::Stats { plan, week } => {
            let plan = read_plan(&plan)?;
            let tracker = CompletionTracker::new();
            let json = match week {
                Some(w) => serde_json::to_string_pretty(&tracker.weekly_stats(&plan, w))?,
                None => serde_json::to_string_pretty(&tracker.plan_stats(&plan))?,
            };
            println!("{json}");
        }
        PlanAction::Complete {
            plan: path,
            id,
            undo,
            notes,
        } => {
            let mut plan = read_plan(&path)?;
            let tracker = CompletionTracker::new();

            let event = if undo {
                tracker.uncomplete(&mut plan, &id)?
            } else {
                tracker.complete(&mut plan, &id)?
            };
            if notes.is_some() {
                tracker.set_notes(&mut plan, &id, notes)?;
            }
            write_plan(&path, &plan)?;

            match event {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None if undo => println!("session {id} was not completed"),
                None => println!("session {id} already completed"),
            }
        }
        PlanAction::Today { plan, date, json } => {
            let plan = read_plan(&plan)?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let tracker = CompletionTracker::new();
            let sessions = tracker.sessions_on(&plan, date);

            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
                return Ok(());
            }

            if sessions.is_empty() {
                println!("no sessions on {date}");
                return Ok(());
            }
            for s in &sessions {
                let marker = if s.completed { "x" } else { " " };
                println!(
                    "[{marker}] {}-{}  {:<24} {} pomodoro(s)  {}",
                    s.start_date_time.format("%H:%M"),
                    s.end_date_time.format("%H:%M"),
                    s.subject_name,
                    s.pomodoro_count,
                    s.id
                );
            }
            let stats = tracker.daily_stats(&plan, date);
            println!("{}/{} done", stats.completed, stats.total);
        }
    }
    Ok(())
}
