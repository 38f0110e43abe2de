#![forbid(unsafe_code)]

//! The built-in Rust curriculum: six lessons from basics to concurrency.

pub mod basics;
pub mod collections;
pub mod concurrency;
pub mod error;
pub mod generics;
pub mod ownership;
pub mod quiz_bank;
pub mod traits;

pub use basics::BasicsLesson;
pub use collections::CollectionsLesson;
pub use concurrency::ConcurrencyLesson;
pub use error::CurriculumError;
pub use generics::GenericsLesson;
pub use ownership::OwnershipLesson;
pub use traits::TraitsLesson;

use services::LessonPlan;

/// Every lesson, ordered by level.
///
/// # Errors
///
/// Returns `CurriculumError` if a lesson's metadata or bundled quiz is invalid.
pub fn curriculum() -> Result<Vec<Box<dyn LessonPlan>>, CurriculumError> {
    let lessons: Vec<Box<dyn LessonPlan>> = vec![
        Box::new(BasicsLesson::new()?),
        Box::new(OwnershipLesson::new()?),
        Box::new(TraitsLesson::new()?),
        Box::new(GenericsLesson::new()?),
        Box::new(CollectionsLesson::new()?),
        Box::new(ConcurrencyLesson::new()?),
    ];
    tracing::debug!(count = lessons.len(), "curriculum assembled");
    Ok(lessons)
}
