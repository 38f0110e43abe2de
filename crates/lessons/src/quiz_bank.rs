//! Quiz banks bundled into the binary.

use quest_core::model::{Quiz, QuizDraft};

use crate::error::CurriculumError;

pub(crate) const GENERICS: (&str, &str) = ("generics", include_str!("../quizzes/generics.json"));
pub(crate) const COLLECTIONS: (&str, &str) =
    ("collections", include_str!("../quizzes/collections.json"));
pub(crate) const CONCURRENCY: (&str, &str) =
    ("concurrency", include_str!("../quizzes/concurrency.json"));

/// Parse and validate a bundled quiz bank.
///
/// # Errors
///
/// Returns `CurriculumError::Parse` for malformed JSON and
/// `CurriculumError::Quiz` if the quiz fails validation.
pub fn load(bank: &'static str, raw: &str) -> Result<Quiz, CurriculumError> {
    let draft: QuizDraft =
        serde_json::from_str(raw).map_err(|source| CurriculumError::Parse { bank, source })?;
    draft
        .validate()
        .map_err(|source| CurriculumError::Quiz { bank, source })
}
