//! Curriculum catalog.
//!
//! A static, read-only table mapping a grade/level code to the ordered list
//! of subjects studied in it. The built-in table covers the Brazilian basic
//! education years 6 to 9 (fundamental) and the three years of ensino médio.

mod builtin;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlanError;

/// Coarse importance ranking used to bias subject rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PriorityTier {
    type Err = String;

    /// Accepts the English names and the Portuguese ones used by school forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "alta" => Ok(Self::High),
            "medium" | "média" | "media" => Ok(Self::Medium),
            "low" | "baixa" => Ok(Self::Low),
            other => Err(format!("unknown priority tier: {other}")),
        }
    }
}

/// A subject of study within a grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    /// Advisory weekly target, in hours.
    pub weekly_hours: f64,
    pub priority_tier: PriorityTier,
    /// 1 (easy) ..= 5 (hard)
    pub difficulty: u8,
    pub enabled: bool,
}

impl Subject {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weekly_hours: f64,
        priority_tier: PriorityTier,
        difficulty: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weekly_hours,
            priority_tier,
            difficulty,
            enabled: true,
        }
    }

    /// Check value ranges: positive weekly hours, difficulty in 1..=5.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(self.weekly_hours > 0.0) {
            return Err(PlanError::InvalidSubject {
                id: self.id.clone(),
                message: format!("weekly hours must be > 0, got {}", self.weekly_hours),
            });
        }
        if !(1..=5).contains(&self.difficulty) {
            return Err(PlanError::InvalidSubject {
                id: self.id.clone(),
                message: format!("difficulty must be in 1..=5, got {}", self.difficulty),
            });
        }
        Ok(())
    }
}

/// One grade row of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    /// Stable code, e.g. `6-ano`.
    pub code: String,
    /// Display label, e.g. `6º ano`.
    pub label: String,
    pub subjects: Vec<Subject>,
}

/// Read-only grade → subjects table.
#[derive(Debug, Clone)]
pub struct CurriculumCatalog {
    grades: Vec<GradeEntry>,
}

impl CurriculumCatalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            grades: builtin::grades(),
        }
    }

    /// Build a custom catalog, rejecting subjects outside their value ranges.
    pub fn from_entries(grades: Vec<GradeEntry>) -> Result<Self, PlanError> {
        for grade in &grades {
            for subject in &grade.subjects {
                subject.validate()?;
            }
        }
        Ok(Self { grades })
    }

    /// Subjects of a grade, in catalog order.
    ///
    /// `grade_level` matches either the code or the display label,
    /// ignoring case and surrounding whitespace.
    pub fn lookup(&self, grade_level: &str) -> Result<Vec<Subject>, PlanError> {
        self.entry(grade_level)
            .map(|g| g.subjects.clone())
            .ok_or_else(|| PlanError::UnknownGradeLevel(grade_level.to_string()))
    }

    /// The full grade row for a code or label.
    pub fn entry(&self, grade_level: &str) -> Option<&GradeEntry> {
        let needle = grade_level.trim().to_lowercase();
        self.grades
            .iter()
            .find(|g| g.code.to_lowercase() == needle || g.label.to_lowercase() == needle)
    }

    /// Known grades as `(code, label)`, in catalog order.
    pub fn grades(&self) -> Vec<(&str, &str)> {
        self.grades
            .iter()
            .map(|g| (g.code.as_str(), g.label.as_str()))
            .collect()
    }
}

impl Default for CurriculumCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_seven_grades() {
        let catalog = CurriculumCatalog::builtin();
        let codes: Vec<_> = catalog.grades().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            codes,
            vec!["6-ano", "7-ano", "8-ano", "9-ano", "1-medio", "2-medio", "3-medio"]
        );
    }

    #[test]
    fn lookup_by_code_and_label() {
        let catalog = CurriculumCatalog::builtin();
        let by_code = catalog.lookup("6-ano").unwrap();
        let by_label = catalog.lookup("  6º ANO ").unwrap();
        assert_eq!(by_code, by_label);
        assert_eq!(by_code[0].id, "lingua_portuguesa");
        assert_eq!(by_code.len(), 7);
    }

    #[test]
    fn lookup_unknown_grade_fails() {
        let catalog = CurriculumCatalog::builtin();
        let err = catalog.lookup("5-ano").unwrap_err();
        assert_eq!(err, PlanError::UnknownGradeLevel("5-ano".into()));
    }

    #[test]
    fn builtin_subjects_are_valid() {
        let catalog = CurriculumCatalog::builtin();
        for (code, _) in catalog.grades() {
            for subject in catalog.lookup(code).unwrap() {
                subject.validate().unwrap();
            }
        }
    }

    #[test]
    fn final_year_includes_writing() {
        let subjects = CurriculumCatalog::builtin().lookup("3-medio").unwrap();
        let redacao = subjects.iter().find(|s| s.id == "redacao").unwrap();
        assert_eq!(redacao.priority_tier, PriorityTier::High);
        assert!(redacao.enabled);
        assert!(subjects.iter().any(|s| s.id == "filosofia" && !s.enabled));
    }

    #[test]
    fn from_entries_rejects_bad_difficulty() {
        let mut subject = Subject::new("x", "X", 2.0, PriorityTier::Low, 1);
        subject.difficulty = 9;
        let err = CurriculumCatalog::from_entries(vec![GradeEntry {
            code: "g".into(),
            label: "G".into(),
            subjects: vec![subject],
        }])
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidSubject { .. }));
    }

    #[test]
    fn priority_tier_parses_portuguese() {
        assert_eq!("alta".parse::<PriorityTier>().unwrap(), PriorityTier::High);
        assert_eq!("Média".parse::<PriorityTier>().unwrap(), PriorityTier::Medium);
        assert_eq!("baixa".parse::<PriorityTier>().unwrap(), PriorityTier::Low);
        assert!("urgent".parse::<PriorityTier>().is_err());
    }
}
