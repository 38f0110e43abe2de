use thiserror::Error;

use quest_core::model::{LessonError, QuizError};

/// Errors raised while assembling the curriculum.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error("quiz bank `{bank}` is not valid JSON: {source}")]
    Parse {
        bank: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("quiz bank `{bank}` is invalid: {source}")]
    Quiz {
        bank: &'static str,
        #[source]
        source: QuizError,
    },
}
