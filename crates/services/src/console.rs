//! Console capability used by lessons and the sequencer.
//!
//! Everything the tutorial prints or asks goes through [`Console`], so the
//! terminal can be swapped for [`ScriptedConsole`] in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ConsoleError;

const RULE_WIDTH: usize = 60;

/// Text output and yes/no input.
pub trait Console {
    /// Print a section header.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if the output cannot be written.
    fn header(&mut self, title: &str) -> Result<(), ConsoleError>;

    /// Print a block of explanatory text.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if the output cannot be written.
    fn text(&mut self, body: &str) -> Result<(), ConsoleError>;

    /// Print a fenced code snippet.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if the output cannot be written.
    fn code(&mut self, snippet: &str) -> Result<(), ConsoleError>;

    /// Print a success line.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if the output cannot be written.
    fn success(&mut self, message: &str) -> Result<(), ConsoleError>;

    /// Print a failure line.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if the output cannot be written.
    fn failure(&mut self, message: &str) -> Result<(), ConsoleError>;

    /// Wait for the learner before moving on.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if reading input fails.
    fn pause(&mut self) -> Result<(), ConsoleError>;

    /// Ask a yes/no question. Anything that is not a yes is a no.
    ///
    /// Leading whitespace is skipped before looking for `y`/`Y`, so `" yes"`
    /// counts as yes.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` if the prompt cannot be written or the answer read.
    fn confirm(&mut self, prompt: &str) -> Result<bool, ConsoleError>;
}

//
// ─── FORMATTING ────────────────────────────────────────────────────────────────
//

#[must_use]
pub fn format_header(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n🎯 {title}\n{rule}\n\n")
}

#[must_use]
pub fn format_code(snippet: &str) -> String {
    format!("```rust\n{}\n```\n\n", snippet.trim_matches('\n'))
}

#[must_use]
pub fn format_success(message: &str) -> String {
    format!("✅ {message}\n")
}

#[must_use]
pub fn format_failure(message: &str) -> String {
    format!("❌ {message}\n")
}

#[must_use]
pub fn format_prompt(prompt: &str) -> String {
    format!("{prompt} (y/n): ")
}

/// Returns true if a typed response counts as "yes".
#[must_use]
pub fn is_affirmative(response: &str) -> bool {
    matches!(response.trim_start().chars().next(), Some('y' | 'Y'))
}

//
// ─── TERMINAL ──────────────────────────────────────────────────────────────────
//

/// Console backed by a reader and a writer, normally stdin and stdout.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
    pauses: bool,
}

impl TerminalConsole<StdinLock<'static>, Stdout> {
    /// Console over the process stdin/stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pauses: true,
        }
    }

    /// Enable or disable waiting for Enter between steps.
    #[must_use]
    pub fn with_pauses(mut self, pauses: bool) -> Self {
        self.pauses = pauses;
        self
    }

    /// Consume the console and return the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn write(&mut self, s: &str) -> Result<(), ConsoleError> {
        self.output.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Read one line; bytes that are not UTF-8 are replaced, never rejected.
    fn read_line(&mut self) -> Result<String, ConsoleError> {
        self.output.flush()?;
        let mut line = Vec::new();
        self.input.read_until(b'\n', &mut line)?;
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn header(&mut self, title: &str) -> Result<(), ConsoleError> {
        self.write(&format_header(title))
    }

    fn text(&mut self, body: &str) -> Result<(), ConsoleError> {
        self.write(body)?;
        self.write("\n")
    }

    fn code(&mut self, snippet: &str) -> Result<(), ConsoleError> {
        self.write(&format_code(snippet))
    }

    fn success(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.write(&format_success(message))
    }

    fn failure(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.write(&format_failure(message))
    }

    fn pause(&mut self) -> Result<(), ConsoleError> {
        if !self.pauses {
            return Ok(());
        }
        self.write("Press Enter to continue...")?;
        self.read_line()?;
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, ConsoleError> {
        self.write(&format_prompt(prompt))?;
        let line = self.read_line()?;
        Ok(is_affirmative(&line))
    }
}

//
// ─── SCRIPTED ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default)]
struct ScriptState {
    answers: VecDeque<bool>,
    fallback: bool,
    transcript: String,
    prompts: Vec<String>,
    pauses: usize,
}

/// In-memory console that answers from a script and records everything printed.
///
/// Clones share the same state, so a test can hand one clone to the code under
/// test and inspect the transcript through another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedConsole {
    /// A console that answers "no" once its script runs out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A console that answers every question with `answer`.
    #[must_use]
    pub fn always(answer: bool) -> Self {
        Self::new().with_fallback(answer)
    }

    #[must_use]
    pub fn with_answers(self, answers: impl IntoIterator<Item = bool>) -> Self {
        for answer in answers {
            self.push_answer(answer);
        }
        self
    }

    /// Answer used when the script is exhausted.
    #[must_use]
    pub fn with_fallback(self, answer: bool) -> Self {
        self.snapshot_mut(|state| state.fallback = answer);
        self
    }

    pub fn push_answer(&self, answer: bool) {
        self.snapshot_mut(|state| state.answers.push_back(answer));
    }

    #[must_use]
    pub fn transcript(&self) -> String {
        self.snapshot(|state| state.transcript.clone())
    }

    /// Prompts asked so far, in order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.snapshot(|state| state.prompts.clone())
    }

    #[must_use]
    pub fn pause_count(&self) -> usize {
        self.snapshot(|state| state.pauses)
    }

    #[must_use]
    pub fn remaining_answers(&self) -> usize {
        self.snapshot(|state| state.answers.len())
    }

    pub fn clear_transcript(&self) {
        self.snapshot_mut(|state| state.transcript.clear());
    }

    fn snapshot<T>(&self, read: impl FnOnce(&ScriptState) -> T) -> T {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        read(&guard)
    }

    fn snapshot_mut(&self, write: impl FnOnce(&mut ScriptState)) {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        write(&mut guard);
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut ScriptState) -> T,
    ) -> Result<T, ConsoleError> {
        let mut guard = self.state.lock().map_err(|_| ConsoleError::Poisoned)?;
        Ok(f(&mut guard))
    }

    fn append(&self, s: &str) -> Result<(), ConsoleError> {
        self.with_state(|state| state.transcript.push_str(s))
    }
}

impl Console for ScriptedConsole {
    fn header(&mut self, title: &str) -> Result<(), ConsoleError> {
        self.append(&format_header(title))
    }

    fn text(&mut self, body: &str) -> Result<(), ConsoleError> {
        self.with_state(|state| {
            state.transcript.push_str(body);
            state.transcript.push('\n');
        })
    }

    fn code(&mut self, snippet: &str) -> Result<(), ConsoleError> {
        self.append(&format_code(snippet))
    }

    fn success(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.append(&format_success(message))
    }

    fn failure(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.append(&format_failure(message))
    }

    fn pause(&mut self) -> Result<(), ConsoleError> {
        self.with_state(|state| state.pauses += 1)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, ConsoleError> {
        self.with_state(|state| {
            let answer = state.answers.pop_front().unwrap_or(state.fallback);
            state.transcript.push_str(&format_prompt(prompt));
            state.transcript.push_str(if answer { "y\n" } else { "n\n" });
            state.prompts.push(prompt.to_owned());
            answer
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
