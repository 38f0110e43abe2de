//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by a `Console` implementation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConsoleError {
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("console state was poisoned by a panicking writer")]
    Poisoned,
}

/// Errors emitted while running a lesson.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonRunError {
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error("live demonstration failed: {0}")]
    Demonstration(#[source] std::io::Error),
    #[error("a worker thread in the live demonstration panicked")]
    WorkerPanicked,
}
