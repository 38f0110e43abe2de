use quest_core::model::{
    CompletionPolicy, LessonInfo, LessonLevel, QuizDraft, QuizQuestion,
};
use quest_core::time::fixed_clock;
use services::console::Console;
use services::{
    Advance, Demonstration, LessonPlan, LessonRunError, LessonSequencer, ScriptedConsole,
};

fn count_to_three(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let total: u32 = (1..=3).sum();
    console.text(&format!("sum = {total}"))?;
    Ok(())
}

const STEPS: &[Demonstration] = &[Demonstration {
    title: "Counting",
    explanation: "Ranges are iterators.",
    snippet: "let total: u32 = (1..=3).sum();",
    live: count_to_three,
}];

struct SmokePlan {
    info: LessonInfo,
    completion: CompletionPolicy,
}

impl LessonPlan for SmokePlan {
    fn info(&self) -> &LessonInfo {
        &self.info
    }

    fn greeting(&self) -> &str {
        "Let's go."
    }

    fn demonstrations(&self) -> &[Demonstration] {
        STEPS
    }

    fn completion(&self) -> &CompletionPolicy {
        &self.completion
    }

    fn retry_hint(&self) -> &str {
        "Review and try again."
    }
}

#[test]
fn tutorial_runs_to_completion_with_one_retry() {
    let quiz = QuizDraft::new(
        2,
        vec![
            QuizQuestion::new("Is 1 + 1 == 2?", true, ""),
            QuizQuestion::new("Is 2 + 2 == 5?", false, ""),
        ],
    )
    .validate()
    .unwrap();

    // Confirm lesson: yes. Quiz lesson: first attempt (true, true) fails, retry (true, false) passes.
    let console = ScriptedConsole::new().with_answers([true, true, true, true, false]);
    let mut seq = LessonSequencer::new(Box::new(console.clone()), fixed_clock());
    seq.register(Box::new(SmokePlan {
        info: LessonInfo::new("Warmup", "First steps", LessonLevel::new(0)).unwrap(),
        completion: CompletionPolicy::confirm("Ready?"),
    }));
    seq.register(Box::new(SmokePlan {
        info: LessonInfo::new("Arithmetic", "Adding numbers", LessonLevel::new(1)).unwrap(),
        completion: CompletionPolicy::Quiz(quiz),
    }));

    let mut advances = Vec::new();
    while !seq.all_completed() {
        advances.push(seq.advance().unwrap());
    }

    assert_eq!(
        advances,
        vec![
            Advance::Completed {
                level: LessonLevel::new(0)
            },
            Advance::Blocked {
                level: LessonLevel::new(1)
            },
            Advance::Completed {
                level: LessonLevel::new(1)
            },
        ]
    );
    assert_eq!(console.remaining_answers(), 0);

    let out = console.transcript();
    assert_eq!(out.matches("sum = 6").count(), 3);
    assert!(out.contains("[Arithmetic] Review and try again."));
    assert!(out.contains("Lesson completed: Arithmetic"));

    console.clear_transcript();
    seq.report_progress().unwrap();
    assert!(console.transcript().contains("100.0% (2/2)"));
}
