mod lesson;
mod report;
mod sequencer;

// Public API of the tutorial subsystem.
pub use crate::error::LessonRunError;
pub use lesson::{Demonstration, Lesson, LessonOutcome, LessonPlan, LiveDemo};
pub use report::{render_lesson, render_tutorial};
pub use sequencer::{Advance, LessonSequencer};
