use std::fmt;

use thiserror::Error;

use crate::model::ids::LessonLevel;
use crate::model::quiz::Quiz;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson name cannot be empty")]
    EmptyName,

    #[error("lesson description cannot be empty")]
    EmptyDescription,
}

//
// ─── INFO ──────────────────────────────────────────────────────────────────────
//

/// Static metadata describing a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonInfo {
    name: String,
    description: String,
    level: LessonLevel,
}

impl LessonInfo {
    /// Creates lesson metadata.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyName` or `LessonError::EmptyDescription` for blank text.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        level: LessonLevel,
    ) -> Result<Self, LessonError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LessonError::EmptyName);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(LessonError::EmptyDescription);
        }

        Ok(Self {
            name,
            description,
            level,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn level(&self) -> LessonLevel {
        self.level
    }
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a lesson. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LessonStatus {
    #[default]
    InProgress,
    Completed,
}

impl LessonStatus {
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, LessonStatus::Completed)
    }

    /// Human-readable status label used in progress reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LessonStatus::InProgress => "🔄 In Progress",
            LessonStatus::Completed => "✅ Completed",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── COMPLETION POLICY ─────────────────────────────────────────────────────────
//

/// Decides how a lesson is judged complete at the end of its script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// The learner confirms understanding with a yes/no prompt.
    Confirm { prompt: String },
    /// The learner must reach the quiz pass threshold.
    Quiz(Quiz),
}

impl CompletionPolicy {
    #[must_use]
    pub fn confirm(prompt: impl Into<String>) -> Self {
        Self::Confirm {
            prompt: prompt.into(),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        match self {
            CompletionPolicy::Quiz(quiz) => Some(quiz),
            CompletionPolicy::Confirm { .. } => None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_exposes_fields() {
        let info = LessonInfo::new("Basics", "Syntax and types", LessonLevel::new(0)).unwrap();
        assert_eq!(info.name(), "Basics");
        assert_eq!(info.description(), "Syntax and types");
        assert_eq!(info.level(), LessonLevel::new(0));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = LessonInfo::new("  ", "desc", LessonLevel::new(1)).unwrap_err();
        assert_eq!(err, LessonError::EmptyName);
    }

    #[test]
    fn blank_description_is_rejected() {
        let err = LessonInfo::new("Name", "", LessonLevel::new(1)).unwrap_err();
        assert_eq!(err, LessonError::EmptyDescription);
    }

    #[test]
    fn status_defaults_to_in_progress() {
        let status = LessonStatus::default();
        assert!(!status.is_completed());
        assert_eq!(status.to_string(), "🔄 In Progress");
        assert!(LessonStatus::Completed.is_completed());
    }

    #[test]
    fn confirm_policy_has_no_quiz() {
        let policy = CompletionPolicy::confirm("Got it?");
        assert!(policy.quiz().is_none());
    }
}
