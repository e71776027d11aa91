pub mod catalog;
pub mod config;
pub mod plan;
pub mod timer;

use std::path::Path;

use studyplan_core::StudyPlan;

pub(crate) fn read_plan(path: &Path) -> Result<StudyPlan, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read plan {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

pub(crate) fn write_plan(path: &Path, plan: &StudyPlan) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, json).map_err(|e| format!("cannot write plan {}: {e}", path.display()))?;
    Ok(())
}
