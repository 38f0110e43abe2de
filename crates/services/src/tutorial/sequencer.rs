use std::fmt;

use quest_core::Clock;
use quest_core::model::{LessonLevel, TutorialProgress};

use super::lesson::{Lesson, LessonPlan};
use super::report::render_tutorial;
use crate::console::Console;
use crate::error::{ConsoleError, LessonRunError};

/// Result of one call to [`LessonSequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current lesson completed and the sequencer moved past it.
    Completed { level: LessonLevel },
    /// The current lesson ran but did not complete; the index stays put.
    Blocked { level: LessonLevel },
    /// Every lesson was already completed; nothing ran.
    Finished,
}

/// Owns the ordered lessons and steps through them one at a time.
///
/// `current` only moves forward, and only past a lesson that reports
/// completion, so it always stays within `0..=lessons.len()`.
pub struct LessonSequencer {
    lessons: Vec<Lesson>,
    current: usize,
    clock: Clock,
    console: Box<dyn Console>,
    shuffle_quizzes: bool,
}

impl LessonSequencer {
    #[must_use]
    pub fn new(console: Box<dyn Console>, clock: Clock) -> Self {
        Self {
            lessons: Vec::new(),
            current: 0,
            clock,
            console,
            shuffle_quizzes: false,
        }
    }

    /// Shuffle quiz questions for lessons registered after this call.
    #[must_use]
    pub fn with_shuffle_quizzes(mut self, shuffle: bool) -> Self {
        self.shuffle_quizzes = shuffle;
        self
    }

    /// Append a lesson; registration order is execution order.
    pub fn register(&mut self, plan: Box<dyn LessonPlan>) {
        let lesson = Lesson::new(plan, self.clock).with_shuffle_quiz(self.shuffle_quizzes);
        tracing::debug!(
            lesson = %lesson.info().name(),
            position = self.lessons.len(),
            "lesson registered"
        );
        self.lessons.push(lesson);
    }

    /// Run the current lesson and move past it if it completes.
    ///
    /// Does nothing once every lesson is completed.
    ///
    /// # Errors
    ///
    /// Returns `LessonRunError` if the lesson's console or live demonstration fails.
    pub fn advance(&mut self) -> Result<Advance, LessonRunError> {
        let Some(lesson) = self.lessons.get_mut(self.current) else {
            return Ok(Advance::Finished);
        };

        let level = lesson.info().level();
        self.console
            .header(&format!("Starting {}", lesson.info().name()))?;
        let outcome = lesson.begin(self.console.as_mut())?;

        if outcome.completed {
            self.current += 1;
            tracing::info!(%level, current = self.current, total = self.lessons.len(), "advanced");
            Ok(Advance::Completed { level })
        } else {
            tracing::info!(%level, current = self.current, "blocked on lesson");
            Ok(Advance::Blocked { level })
        }
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.current >= self.lessons.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_lesson(&self) -> Option<&Lesson> {
        self.lessons.get(self.current)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// The console every lesson writes to.
    pub fn console(&mut self) -> &mut dyn Console {
        self.console.as_mut()
    }

    /// Snapshot of every lesson plus the current index.
    #[must_use]
    pub fn progress(&self) -> TutorialProgress {
        let now = self.clock.now();
        TutorialProgress {
            lessons: self.lessons.iter().map(|l| l.progress_at(now)).collect(),
            current: self.current,
        }
    }

    /// Print each lesson's status and the overall percentage.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if the console cannot be written.
    pub fn report_progress(&mut self) -> Result<(), ConsoleError> {
        let rendered = render_tutorial(&self.progress());
        self.console.text(&rendered)
    }
}

impl fmt::Debug for LessonSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LessonSequencer")
            .field("lessons", &self.lessons)
            .field("current", &self.current)
            .field("clock", &self.clock)
            .field("shuffle_quizzes", &self.shuffle_quizzes)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::tutorial::lesson::Demonstration;
    use quest_core::model::{CompletionPolicy, LessonInfo};
    use quest_core::time::fixed_clock;

    struct Plan {
        info: LessonInfo,
        completion: CompletionPolicy,
    }

    impl Plan {
        fn boxed(name: &str, level: u32) -> Box<dyn LessonPlan> {
            Box::new(Self {
                info: LessonInfo::new(name, "Mock lesson", LessonLevel::new(level)).unwrap(),
                completion: CompletionPolicy::confirm(format!("Finished {name}?")),
            })
        }
    }

    impl LessonPlan for Plan {
        fn info(&self) -> &LessonInfo {
            &self.info
        }

        fn greeting(&self) -> &str {
            "hi"
        }

        fn demonstrations(&self) -> &[Demonstration] {
            &[]
        }

        fn completion(&self) -> &CompletionPolicy {
            &self.completion
        }
    }

    fn sequencer(console: &ScriptedConsole, names: &[&str]) -> LessonSequencer {
        let mut seq = LessonSequencer::new(Box::new(console.clone()), fixed_clock());
        for (level, name) in (0..).zip(names) {
            seq.register(Plan::boxed(name, level));
        }
        seq
    }

    #[test]
    fn two_completing_lessons_finish_after_two_advances() {
        let console = ScriptedConsole::always(true);
        let mut seq = sequencer(&console, &["L1", "L2"]);
        assert!(!seq.all_completed());

        assert_eq!(
            seq.advance().unwrap(),
            Advance::Completed {
                level: LessonLevel::new(0)
            }
        );
        assert_eq!(seq.current_index(), 1);
        assert!(!seq.all_completed());

        seq.advance().unwrap();
        assert_eq!(seq.current_index(), 2);
        assert!(seq.all_completed());
    }

    #[test]
    fn n_lessons_complete_exactly_on_nth_advance() {
        for n in 1..=5 {
            let console = ScriptedConsole::always(true);
            let names: Vec<String> = (0..n).map(|i| format!("Lesson {i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut seq = sequencer(&console, &refs);

            for call in 1..=n {
                assert!(!seq.all_completed(), "completed before call {call} of {n}");
                seq.advance().unwrap();
            }
            assert!(seq.all_completed());
        }
    }

    #[test]
    fn never_completing_lesson_blocks_forever() {
        let console = ScriptedConsole::always(false);
        let mut seq = sequencer(&console, &["Stuck"]);

        for _ in 0..5 {
            assert_eq!(
                seq.advance().unwrap(),
                Advance::Blocked {
                    level: LessonLevel::new(0)
                }
            );
            assert_eq!(seq.current_index(), 0);
            assert!(!seq.all_completed());
        }
        // Each advance re-runs the lesson from the start.
        assert_eq!(console.prompts().len(), 5);
    }

    #[test]
    fn blocked_lesson_does_not_let_later_lessons_run() {
        let console = ScriptedConsole::new().with_answers([true, false, false]);
        let mut seq = sequencer(&console, &["A", "B", "C"]);

        seq.advance().unwrap();
        seq.advance().unwrap();
        seq.advance().unwrap();

        assert_eq!(seq.current_index(), 1);
        assert_eq!(
            console.prompts(),
            vec!["Finished A?", "Finished B?", "Finished B?"]
        );
    }

    #[test]
    fn advance_past_end_is_noop() {
        let console = ScriptedConsole::always(true);
        let mut seq = sequencer(&console, &["Only"]);
        seq.advance().unwrap();
        console.clear_transcript();

        assert_eq!(seq.advance().unwrap(), Advance::Finished);
        assert_eq!(seq.current_index(), 1);
        assert!(console.transcript().is_empty());
    }

    #[test]
    fn advance_prints_starting_header() {
        let console = ScriptedConsole::always(true);
        let mut seq = sequencer(&console, &["Basics"]);
        seq.advance().unwrap();
        assert!(console.transcript().contains("🎯 Starting Basics"));
    }

    #[test]
    fn empty_sequencer_is_complete() {
        let console = ScriptedConsole::new();
        let mut seq = sequencer(&console, &[]);
        assert!(seq.is_empty());
        assert!(seq.all_completed());
        assert_eq!(seq.advance().unwrap(), Advance::Finished);
    }

    #[test]
    fn report_shows_zero_of_two() {
        let console = ScriptedConsole::new();
        let mut seq = sequencer(&console, &["Quest 1", "Quest 2"]);

        seq.report_progress().unwrap();

        let out = console.transcript();
        assert!(out.contains("Tutorial Progress"));
        assert!(out.contains("0.0%"));
        assert!(out.contains("0/2"));
        assert!(out.contains("➤ 📚 Lesson: Quest 1"));
    }

    #[test]
    fn report_is_idempotent_without_advance() {
        let console = ScriptedConsole::always(true);
        let mut seq = sequencer(&console, &["A", "B", "C"]);
        seq.advance().unwrap();

        console.clear_transcript();
        seq.report_progress().unwrap();
        let first = console.transcript();
        console.clear_transcript();
        seq.report_progress().unwrap();
        let second = console.transcript();

        assert_eq!(first, second);
        assert!(first.contains("33.3% (1/3)"));
    }

    #[test]
    fn progress_snapshot_matches_index() {
        let console = ScriptedConsole::always(true);
        let mut seq = sequencer(&console, &["A", "B"]);
        seq.advance().unwrap();

        let progress = seq.progress();
        assert_eq!(progress.current, 1);
        assert!(progress.lessons[0].is_completed());
        assert!(!progress.lessons[1].is_completed());
        assert_eq!(seq.current_lesson().unwrap().info().name(), "B");
    }
}
