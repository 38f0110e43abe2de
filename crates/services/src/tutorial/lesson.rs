use std::fmt;
use std::time::{Duration, Instant};

use quest_core::Clock;
use quest_core::model::{
    CompletionPolicy, LessonInfo, LessonProgress, LessonStatus, Quiz, QuizQuestion, QuizScore,
};
use rand::rng;
use rand::seq::SliceRandom;

use super::report::render_lesson;
use crate::console::Console;
use crate::error::{ConsoleError, LessonRunError};

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

/// Live part of a demonstration: real code that prints what it did.
pub type LiveDemo = fn(&mut dyn Console) -> Result<(), LessonRunError>;

/// One step of a lesson script.
#[derive(Clone, Copy)]
pub struct Demonstration {
    pub title: &'static str,
    pub explanation: &'static str,
    pub snippet: &'static str,
    pub live: LiveDemo,
}

impl fmt::Debug for Demonstration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Demonstration")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

const DEFAULT_RETRY_HINT: &str =
    "Take your time to review the concepts. You can restart this lesson anytime!";

/// Content of a single topic. One implementor per topic.
pub trait LessonPlan {
    fn info(&self) -> &LessonInfo;

    /// Opening line logged when the lesson begins.
    fn greeting(&self) -> &str;

    /// Steps run in order by [`Lesson::begin`].
    fn demonstrations(&self) -> &[Demonstration];

    fn completion(&self) -> &CompletionPolicy;

    /// Logged when the learner does not pass.
    fn retry_hint(&self) -> &str {
        DEFAULT_RETRY_HINT
    }
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// What happened during one run of [`Lesson::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonOutcome {
    pub completed: bool,
    pub quiz: Option<QuizScore>,
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// A lesson plan plus its completion state.
///
/// The status moves from `InProgress` to `Completed` at most once, and only
/// from inside [`Lesson::begin`].
pub struct Lesson {
    plan: Box<dyn LessonPlan>,
    status: LessonStatus,
    clock: Clock,
    started_at: Instant,
    completed_in: Option<Duration>,
    shuffle_quiz: bool,
}

impl Lesson {
    /// Wrap a plan; the start timestamp is read from `clock` now.
    #[must_use]
    pub fn new(plan: Box<dyn LessonPlan>, clock: Clock) -> Self {
        Self {
            plan,
            status: LessonStatus::InProgress,
            clock,
            started_at: clock.now(),
            completed_in: None,
            shuffle_quiz: false,
        }
    }

    /// Enable or disable shuffling quiz questions on each run.
    #[must_use]
    pub fn with_shuffle_quiz(mut self, shuffle: bool) -> Self {
        self.shuffle_quiz = shuffle;
        self
    }

    #[must_use]
    pub fn info(&self) -> &LessonInfo {
        self.plan.info()
    }

    #[must_use]
    pub fn status(&self) -> LessonStatus {
        self.status
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Time from start to completion, once completed.
    #[must_use]
    pub fn completed_in(&self) -> Option<Duration> {
        self.completed_in
    }

    /// Progress snapshot using the lesson's clock.
    #[must_use]
    pub fn progress(&self) -> LessonProgress {
        self.progress_at(self.clock.now())
    }

    /// Progress snapshot as of `now`.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> LessonProgress {
        LessonProgress {
            info: self.plan.info().clone(),
            status: self.status,
            elapsed: self
                .completed_in
                .unwrap_or_else(|| now.saturating_duration_since(self.started_at)),
        }
    }

    /// Print name, description, status and time spent.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if the console cannot be written.
    pub fn report_progress(&self, console: &mut dyn Console) -> Result<(), ConsoleError> {
        console.text(&render_lesson(&self.progress()))
    }

    /// Run the lesson script, then its completion policy.
    ///
    /// Running a completed lesson again replays the content without re-firing
    /// the completion transition.
    ///
    /// # Errors
    ///
    /// Returns `LessonRunError` if the console fails or a live demonstration fails.
    pub fn begin(&mut self, console: &mut dyn Console) -> Result<LessonOutcome, LessonRunError> {
        let name = self.plan.info().name().to_owned();
        tracing::info!(lesson = %name, level = %self.plan.info().level(), "lesson started");

        log_line(console, &name, self.plan.greeting())?;
        self.run_demonstrations(console)?;

        let (passed, quiz) = match self.plan.completion() {
            CompletionPolicy::Confirm { prompt } => (console.confirm(prompt)?, None),
            CompletionPolicy::Quiz(quiz) => {
                let score = run_quiz(quiz, self.shuffle_quiz, console)?;
                (score.passes(quiz.pass_threshold()), Some(score))
            }
        };

        if passed {
            self.mark_completed(console)?;
        } else {
            tracing::info!(lesson = %name, ?quiz, "lesson not passed");
            log_line(console, &name, self.plan.retry_hint())?;
        }

        Ok(LessonOutcome {
            completed: self.is_completed(),
            quiz,
        })
    }

    fn run_demonstrations(&self, console: &mut dyn Console) -> Result<(), LessonRunError> {
        let steps = self.plan.demonstrations();
        for (index, step) in steps.iter().enumerate() {
            tracing::debug!(lesson = %self.plan.info().name(), step = step.title, "demonstration");
            console.header(step.title)?;
            console.text(step.explanation)?;
            console.code(step.snippet)?;
            console.text("Live demonstration:")?;
            (step.live)(console)?;
            console.text("")?;

            if index + 1 < steps.len() {
                console.pause()?;
            }
        }
        Ok(())
    }

    fn mark_completed(&mut self, console: &mut dyn Console) -> Result<(), ConsoleError> {
        if self.is_completed() {
            return Ok(());
        }

        let elapsed = self.clock.elapsed_since(self.started_at);
        self.status = LessonStatus::Completed;
        self.completed_in = Some(elapsed);
        tracing::info!(
            lesson = %self.plan.info().name(),
            elapsed_secs = elapsed.as_secs(),
            "lesson completed"
        );

        console.success(&format!(
            "Lesson completed: {} in {} seconds!",
            self.plan.info().name(),
            elapsed.as_secs()
        ))?;
        console.text("   You've leveled up your Rust skills! 🚀\n")
    }
}

impl fmt::Debug for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lesson")
            .field("info", self.plan.info())
            .field("status", &self.status)
            .field("started_at", &self.started_at)
            .field("completed_in", &self.completed_in)
            .finish_non_exhaustive()
    }
}

fn log_line(console: &mut dyn Console, lesson: &str, message: &str) -> Result<(), ConsoleError> {
    console.text(&format!("[{lesson}] {message}"))
}

fn run_quiz(
    quiz: &Quiz,
    shuffle: bool,
    console: &mut dyn Console,
) -> Result<QuizScore, ConsoleError> {
    let mut order: Vec<&QuizQuestion> = quiz.questions().iter().collect();
    if shuffle {
        order.shuffle(&mut rng());
    }

    console.header("Quick Quiz")?;
    let mut score = QuizScore::default();
    for question in order {
        let given = console.confirm(&question.prompt)?;
        let correct = question.is_correct(given);
        score.record(correct);

        if correct {
            console.success("Correct!")?;
        } else {
            console.failure("Not quite.")?;
        }
        if !question.explanation.is_empty() {
            console.text(&format!("   {}", question.explanation))?;
        }
    }

    console.text(&format!(
        "Score: {}/{} (need {})\n",
        score.correct,
        score.total,
        quiz.pass_threshold()
    ))?;
    tracing::debug!(correct = score.correct, total = score.total, "quiz scored");
    Ok(score)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
