#![forbid(unsafe_code)]

pub mod console;
pub mod error;
pub mod tutorial;

pub use quest_core::Clock;

pub use console::{Console, ScriptedConsole, TerminalConsole};
pub use error::{ConsoleError, LessonRunError};
pub use tutorial::{
    Advance, Demonstration, Lesson, LessonOutcome, LessonPlan, LessonSequencer, LiveDemo,
};
