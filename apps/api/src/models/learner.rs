use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown skill level '{s}'"))
    }
}

/// Raw form submission. Every field defaults to empty so that a missing
/// field is reported as a validation error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathwayForm {
    pub name: String,
    pub course: String,
    pub duration: String,
    pub level: String,
    pub goals: String,
    pub email: String,
}

/// A validated learner profile. Request-scoped and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearnerProfile {
    pub name: String,
    pub course: String,
    pub duration: String,
    pub level: SkillLevel,
    pub goals: String,
    pub email: String,
}

impl LearnerProfile {
    /// `<name>_<course>_Pathway.pdf` with spaces replaced by underscores.
    pub fn download_file_name(&self) -> String {
        format!(
            "{}_{}_Pathway.pdf",
            self.name.replace(' ', "_"),
            self.course.replace(' ', "_")
        )
    }
}

impl TryFrom<PathwayForm> for LearnerProfile {
    type Error = AppError;

    /// Fails if any of the six fields is blank, naming every blank field.
    fn try_from(form: PathwayForm) -> Result<Self, Self::Error> {
        let fields = [
            ("name", &form.name),
            ("course", &form.course),
            ("duration", &form.duration),
            ("level", &form.level),
            ("goals", &form.goals),
            ("email", &form.email),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Please fill all fields (missing: {}).",
                missing.join(", ")
            )));
        }

        let level = form.level.parse::<SkillLevel>().map_err(AppError::Validation)?;

        Ok(LearnerProfile {
            name: form.name.trim().to_string(),
            course: form.course.trim().to_string(),
            duration: form.duration.trim().to_string(),
            level,
            goals: form.goals.trim().to_string(),
            email: form.email.trim().to_string(),
        })
    }
}
