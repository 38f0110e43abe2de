use std::fmt;

use lessons::curriculum;
use services::{Advance, Clock, LessonRunError, LessonSequencer, TerminalConsole};
use tracing_subscriber::EnvFilter;

mod config;

use config::AppConfig;

#[derive(Debug)]
enum ArgsError {
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  rust-quest [--help]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUEST_PAUSE=0          skip the Enter prompt between demonstrations");
    eprintln!("  QUEST_SHUFFLE_QUIZ=1   ask quiz questions in random order");
    eprintln!("  QUEST_LOG=<filter>     diagnostics filter (falls back to RUST_LOG)");
}

/// Returns `false` when usage was requested and the program should stop.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<bool, ArgsError> {
    match args.next() {
        None => Ok(true),
        Some(arg) if arg == "--help" || arg == "-h" => Ok(false),
        Some(arg) => Err(ArgsError::UnknownArg(arg)),
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

const WELCOME: &str = "\
🦀 Welcome to Rust Quest!
Work through six lessons, from basic syntax to fearless concurrency.
Each lesson shows code, runs it live, then checks your understanding.
";

const CONGRATULATIONS: &str = "\
🎉 Congratulations! You have completed every lesson.
You now know the core of Rust: ownership, traits, generics, collections and concurrency.
";

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let proceed = parse_args(std::env::args().skip(1)).inspect_err(|_| print_usage())?;
    if !proceed {
        print_usage();
        return Ok(());
    }

    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.log_filter);
    tracing::debug!(?cfg, "configuration loaded");

    let console = TerminalConsole::stdio().with_pauses(cfg.pause);
    let mut sequencer = LessonSequencer::new(Box::new(console), Clock::default_clock())
        .with_shuffle_quizzes(cfg.shuffle_quiz);
    for plan in curriculum()? {
        sequencer.register(plan);
    }

    let finished = drive(&mut sequencer)?;
    tracing::debug!(finished, "session ended");
    Ok(())
}

/// Welcome the learner, then offer lessons until they decline or finish.
///
/// Returns `true` once every lesson is completed.
fn drive(sequencer: &mut LessonSequencer) -> Result<bool, LessonRunError> {
    sequencer.console().header("Rust Quest")?;
    sequencer.console().text(WELCOME)?;

    while !sequencer.all_completed() {
        sequencer.report_progress()?;
        if !sequencer.console().confirm("Ready to start the next lesson?")? {
            sequencer
                .console()
                .text("👋 Goodbye! Your progress is only kept for this session.")?;
            return Ok(false);
        }
        match sequencer.advance()? {
            Advance::Completed { level } => tracing::debug!(%level, "lesson passed"),
            Advance::Blocked { level } => tracing::debug!(%level, "lesson will be retried"),
            Advance::Finished => break,
        }
    }

    sequencer.report_progress()?;
    sequencer.console().header("Quest Complete")?;
    sequencer.console().text(CONGRATULATIONS)?;
    Ok(true)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::model::{CompletionPolicy, LessonInfo, LessonLevel};
    use quest_core::time::fixed_clock;
    use services::{Demonstration, LessonPlan, ScriptedConsole};

    struct ConfirmPlan {
        info: LessonInfo,
        completion: CompletionPolicy,
    }

    impl LessonPlan for ConfirmPlan {
        fn info(&self) -> &LessonInfo {
            &self.info
        }

        fn greeting(&self) -> &str {
            "hello"
        }

        fn demonstrations(&self) -> &[Demonstration] {
            &[]
        }

        fn completion(&self) -> &CompletionPolicy {
            &self.completion
        }
    }

    fn sequencer_with(console: &ScriptedConsole, names: &[&str]) -> LessonSequencer {
        let mut sequencer = LessonSequencer::new(Box::new(console.clone()), fixed_clock());
        for (level, name) in (0..).zip(names) {
            sequencer.register(Box::new(ConfirmPlan {
                info: LessonInfo::new(*name, "desc", LessonLevel::new(level)).unwrap(),
                completion: CompletionPolicy::confirm("Got it?"),
            }));
        }
        sequencer
    }

    #[test]
    fn declining_first_prompt_says_goodbye() {
        let console = ScriptedConsole::new().with_answers([false]);
        let mut sequencer = sequencer_with(&console, &["One", "Two"]);

        assert!(!drive(&mut sequencer).unwrap());
        assert_eq!(sequencer.current_index(), 0);

        let out = console.transcript();
        assert!(out.contains("Welcome to Rust Quest"));
        assert!(out.contains("0.0% (0/2)"));
        assert!(out.contains("Goodbye"));
        assert!(!out.contains("Starting One"));
        assert!(!out.contains("Quest Complete"));
    }

    #[test]
    fn blocked_lesson_is_offered_again() {
        // ready, fail the lesson, ready, pass it
        let console = ScriptedConsole::new().with_answers([true, false, true, true]);
        let mut sequencer = sequencer_with(&console, &["Only"]);

        assert!(drive(&mut sequencer).unwrap());
        assert!(sequencer.all_completed());
        assert_eq!(console.transcript().matches("Starting Only").count(), 2);
        assert_eq!(
            console.prompts(),
            [
                "Ready to start the next lesson?",
                "Got it?",
                "Ready to start the next lesson?",
                "Got it?"
            ]
        );
    }

    #[test]
    fn finishing_every_lesson_congratulates() {
        let console = ScriptedConsole::always(true);
        let mut sequencer = sequencer_with(&console, &["One", "Two"]);

        assert!(drive(&mut sequencer).unwrap());
        let out = console.transcript();
        assert!(out.contains("100.0% (2/2)"));
        assert!(out.contains("Quest Complete"));
        assert!(out.contains("Congratulations"));
        assert!(!out.contains("Goodbye"));
    }

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn no_arguments_proceeds() {
        assert!(parse_args(args(&[])).unwrap());
    }

    #[test]
    fn help_stops_before_running() {
        assert!(!parse_args(args(&["--help"])).unwrap());
        assert!(!parse_args(args(&["-h"])).unwrap());
    }

    #[test]
    fn unknown_argument_is_an_error() {
        let err = parse_args(args(&["--db"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown argument: --db");
    }
}
