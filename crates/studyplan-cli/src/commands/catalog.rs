use clap::Subcommand;
use studyplan_core::{CurriculumCatalog, PlanError};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List grade levels
    List,
    /// Show the subjects of one grade level
    Show {
        /// Grade code or label (e.g. "6-ano", "1º ano")
        grade: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CurriculumCatalog::builtin();

    match action {
        CatalogAction::List => {
            for (code, label) in catalog.grades() {
                println!("{code:<10} {label}");
            }
        }
        CatalogAction::Show { grade, json } => {
            let entry = catalog
                .entry(&grade)
                .ok_or_else(|| PlanError::UnknownGradeLevel(grade.clone()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(entry)?);
                return Ok(());
            }

            println!("{} ({})", entry.label, entry.code);
            for s in &entry.subjects {
                let marker = if s.enabled { "x" } else { " " };
                println!(
                    "  [{marker}] {:<24} {:>4.1}h  {:<6}  difficulty {}",
                    s.name, s.weekly_hours, s.priority_tier, s.difficulty
                );
            }
        }
    }
    Ok(())
}
