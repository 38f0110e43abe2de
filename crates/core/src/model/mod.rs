mod ids;
mod lesson;
mod progress;
mod quiz;

pub use ids::LessonLevel;

pub use lesson::{CompletionPolicy, LessonError, LessonInfo, LessonStatus};
pub use progress::{LessonProgress, TutorialProgress};
pub use quiz::{Quiz, QuizDraft, QuizError, QuizQuestion, QuizScore};
