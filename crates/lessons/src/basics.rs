//! Level 0: syntax, types, control flow and functions.

use quest_core::model::{CompletionPolicy, LessonInfo, LessonLevel};
use services::console::Console;
use services::{Demonstration, LessonPlan, LessonRunError};

use crate::error::CurriculumError;

pub struct BasicsLesson {
    info: LessonInfo,
    completion: CompletionPolicy,
}

impl BasicsLesson {
    /// # Errors
    ///
    /// Returns `CurriculumError` if the lesson metadata is invalid.
    pub fn new() -> Result<Self, CurriculumError> {
        Ok(Self {
            info: LessonInfo::new(
                "Rust Basics",
                "Learn fundamental Rust syntax, types, and control structures",
                LessonLevel::new(0),
            )?,
            completion: CompletionPolicy::confirm("Do you understand the basics of Rust syntax?"),
        })
    }
}

impl LessonPlan for BasicsLesson {
    fn info(&self) -> &LessonInfo {
        &self.info
    }

    fn greeting(&self) -> &str {
        "Welcome to Rust Basics! Let's start with the fundamentals."
    }

    fn demonstrations(&self) -> &[Demonstration] {
        DEMONSTRATIONS
    }

    fn completion(&self) -> &CompletionPolicy {
        &self.completion
    }
}

const DEMONSTRATIONS: &[Demonstration] = &[
    Demonstration {
        title: "Types and Bindings",
        explanation: "Rust is statically typed, but the compiler infers most types for you.\n\
                      Bindings are immutable unless you ask for `mut`.",
        snippet: r#"
// Scalar types
let age: i32 = 25;              // 32-bit signed integer
let pi = 3.14159;               // f64 by inference
let is_learning = true;         // bool
let initial = 'R';              // char, a Unicode scalar value
let name = String::from("Ferris"); // owned, growable string

// Mutability is opt-in
let mut counter = 0;
counter += 1;

// Shadowing rebinds a name, even with a new type
let spaces = "   ";
let spaces = spaces.len();

// Collections with literals
let numbers = vec![1, 2, 3, 4, 5];
"#,
        live: demo_types,
    },
    Demonstration {
        title: "Control Flow",
        explanation: "`if`, `match` and loops are expressions, so they can produce values.",
        snippet: r#"
// for loops walk anything iterable
let languages = ["Rust", "C++", "Go"];
for lang in languages {
    println!("Learning: {lang}");
}

// if is an expression
let parity = if 7 % 2 == 0 { "even" } else { "odd" };

// if let binds on a successful pattern match
if let Some(first) = languages.first() {
    println!("First: {first}");
}

// match must be exhaustive
enum Color { Red, Green, Blue }
let label = match Color::Red {
    Color::Red => "red",
    Color::Green => "green",
    Color::Blue => "blue",
};
"#,
        live: demo_control_flow,
    },
    Demonstration {
        title: "Functions and Closures",
        explanation: "Functions declare their parameter and return types; closures capture their environment.",
        snippet: r#"
fn add(a: i32, b: i32) -> i32 {
    a + b            // last expression is the return value
}

// Closures infer their types
let multiply = |a: i32, b: i32| a * b;

// Closures can capture variables
let offset = 10;
let shift = |x: i32| x + offset;

// const fn runs at compile time when used in a const
const fn factorial(n: u64) -> u64 {
    if n <= 1 { 1 } else { n * factorial(n - 1) }
}
const FACT_5: u64 = factorial(5); // 120, computed by the compiler
"#,
        live: demo_functions,
    },
];

fn demo_types(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let inferred = 42;
    let text = String::from("Modern Rust");
    let numbers = vec![1, 2, 3];
    let mut counter = 0;
    counter += numbers.len();

    console.text(&format!("Inferred integer: {inferred}"))?;
    console.text(&format!("String: {text} ({} bytes)", text.len()))?;
    console.text(&format!("Vector contents: {numbers:?}"))?;
    console.text(&format!("Mutable counter after += len: {counter}"))?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Color {
    Red,
    Green,
    Blue,
}

fn demo_control_flow(console: &mut dyn Console) -> Result<(), LessonRunError> {
    for lang in ["Rust", "C++", "Go"] {
        console.text(&format!("🔥 Learning: {lang}"))?;
    }

    for color in [Color::Red, Color::Green, Color::Blue] {
        let label = match color {
            Color::Red => "warm",
            Color::Green | Color::Blue => "cool",
        };
        console.text(&format!("{color:?} is a {label} color"))?;
    }

    let parity = if 7 % 2 == 0 { "even" } else { "odd" };
    console.text(&format!("7 is {parity}"))?;
    Ok(())
}

const fn factorial(n: u64) -> u64 {
    if n <= 1 { 1 } else { n * factorial(n - 1) }
}

const FACT_5: u64 = factorial(5);

fn demo_functions(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let add = |a: i32, b: i32| a + b;
    let offset = 10;
    let shift = |x: i32| x + offset;

    console.text(&format!("add(5, 3) = {}", add(5, 3)))?;
    console.text(&format!("shift(5) with captured offset 10 = {}", shift(5)))?;
    console.text(&format!("factorial(5) computed at compile time = {FACT_5}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::ScriptedConsole;

    #[test]
    fn basics_lesson_metadata() {
        let lesson = BasicsLesson::new().unwrap();
        assert_eq!(lesson.info().name(), "Rust Basics");
        assert_eq!(lesson.info().level(), LessonLevel::new(0));
        assert!(lesson.completion().quiz().is_none());
    }

    #[test]
    fn live_demos_print_results() {
        let console = ScriptedConsole::new();
        for step in DEMONSTRATIONS {
            (step.live)(&mut console.clone()).unwrap();
        }
        let out = console.transcript();
        assert!(out.contains("Vector contents: [1, 2, 3]"));
        assert!(out.contains("7 is odd"));
        assert!(out.contains("add(5, 3) = 8"));
        assert!(out.contains("= 120"));
    }
}
