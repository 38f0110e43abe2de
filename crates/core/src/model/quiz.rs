use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz must contain at least one question")]
    NoQuestions,

    #[error("quiz pass threshold must be > 0")]
    ZeroThreshold,

    #[error("quiz pass threshold ({threshold}) exceeds question count ({total})")]
    ThresholdTooHigh { threshold: u32, total: usize },

    #[error("quiz question {index} has an empty prompt")]
    EmptyPrompt { index: usize },
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Unvalidated quiz as authored in a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub pass_threshold: u32,
    pub questions: Vec<QuizQuestion>,
}

/// A single yes/no question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub answer: bool,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer: bool, explanation: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer,
            explanation: explanation.into(),
        }
    }

    /// Returns true if `given` matches the expected answer.
    #[must_use]
    pub fn is_correct(&self, given: bool) -> bool {
        self.answer == given
    }
}

impl QuizDraft {
    #[must_use]
    pub fn new(pass_threshold: u32, questions: Vec<QuizQuestion>) -> Self {
        Self {
            pass_threshold,
            questions,
        }
    }

    /// Validate the draft into a runnable quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the question list is empty, a prompt is blank,
    /// or the threshold is zero or larger than the number of questions.
    pub fn validate(self) -> Result<Quiz, QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        if self.pass_threshold == 0 {
            return Err(QuizError::ZeroThreshold);
        }
        let total = self.questions.len();
        if usize::try_from(self.pass_threshold).map_or(true, |t| t > total) {
            return Err(QuizError::ThresholdTooHigh {
                threshold: self.pass_threshold,
                total,
            });
        }
        if let Some(index) = self
            .questions
            .iter()
            .position(|q| q.prompt.trim().is_empty())
        {
            return Err(QuizError::EmptyPrompt { index });
        }

        Ok(Quiz {
            pass_threshold: self.pass_threshold,
            questions: self.questions,
        })
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A validated quiz: non-empty, with `0 < pass_threshold <= questions.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pass_threshold: u32,
    questions: Vec<QuizQuestion>,
}

impl Quiz {
    #[must_use]
    pub fn pass_threshold(&self) -> u32 {
        self.pass_threshold
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Result of a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
}

impl QuizScore {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self { correct, total }
    }

    /// Record one more answered question.
    pub fn record(&mut self, correct: bool) {
        self.total = self.total.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    #[must_use]
    pub fn passes(&self, threshold: u32) -> bool {
        self.correct >= threshold
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<QuizQuestion> {
        (0..n)
            .map(|i| QuizQuestion::new(format!("Q{i}?"), i % 2 == 0, "because"))
            .collect()
    }

    #[test]
    fn empty_draft_fails() {
        let err = QuizDraft::new(1, Vec::new()).validate().unwrap_err();
        assert_eq!(err, QuizError::NoQuestions);
    }

    #[test]
    fn zero_threshold_fails() {
        let err = QuizDraft::new(0, questions(2)).validate().unwrap_err();
        assert_eq!(err, QuizError::ZeroThreshold);
    }

    #[test]
    fn threshold_above_question_count_fails() {
        let err = QuizDraft::new(4, questions(3)).validate().unwrap_err();
        assert_eq!(
            err,
            QuizError::ThresholdTooHigh {
                threshold: 4,
                total: 3
            }
        );
    }

    #[test]
    fn blank_prompt_reports_index() {
        let mut qs = questions(3);
        qs[1].prompt = "   ".into();
        let err = QuizDraft::new(2, qs).validate().unwrap_err();
        assert_eq!(err, QuizError::EmptyPrompt { index: 1 });
    }

    #[test]
    fn record_accumulates() {
        let mut score = QuizScore::default();
        score.record(true);
        score.record(false);
        assert_eq!(score, QuizScore::new(1, 2));
    }

    #[test]
    fn draft_deserializes_without_explanation() {
        let raw = r#"{"pass_threshold":1,"questions":[{"prompt":"Is Rust fast?","answer":true}]}"#;
        let draft: QuizDraft = serde_json::from_str(raw).unwrap();
        let quiz = draft.validate().unwrap();
        assert_eq!(quiz.len(), 1);
        assert!(quiz.questions()[0].explanation.is_empty());
    }
}
