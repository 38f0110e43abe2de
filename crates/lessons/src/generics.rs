//! Level 3: generic functions, generic types, macros and trait bounds.

use std::fmt::Display;
use std::ops::Add;

use quest_core::model::{CompletionPolicy, LessonInfo, LessonLevel};
use services::console::Console;
use services::{Demonstration, LessonPlan, LessonRunError};

use crate::error::CurriculumError;
use crate::quiz_bank;

pub struct GenericsLesson {
    info: LessonInfo,
    completion: CompletionPolicy,
}

impl GenericsLesson {
    /// # Errors
    ///
    /// Returns `CurriculumError` if the metadata or the bundled quiz is invalid.
    pub fn new() -> Result<Self, CurriculumError> {
        let (bank, raw) = quiz_bank::GENERICS;
        Ok(Self {
            info: LessonInfo::new(
                "Generics & Trait Bounds",
                "Write code once for many types with generics, bounds and macros",
                LessonLevel::new(3),
            )?,
            completion: CompletionPolicy::Quiz(quiz_bank::load(bank, raw)?),
        })
    }
}

impl LessonPlan for GenericsLesson {
    fn info(&self) -> &LessonInfo {
        &self.info
    }

    fn greeting(&self) -> &str {
        "Generics let the compiler write the repetitive code for you. Let's see how."
    }

    fn demonstrations(&self) -> &[Demonstration] {
        DEMONSTRATIONS
    }

    fn completion(&self) -> &CompletionPolicy {
        &self.completion
    }

    fn retry_hint(&self) -> &str {
        "Generics reward experimentation. Try writing a small generic function, then retake the quiz!"
    }
}

const DEMONSTRATIONS: &[Demonstration] = &[
    Demonstration {
        title: "Generic Functions",
        explanation: "Type parameters plus trait bounds describe exactly what a function needs.",
        snippet: r#"
fn largest<T: PartialOrd + Copy>(items: &[T]) -> Option<T> {
    let mut iter = items.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |max, x| if x > max { x } else { max }))
}

largest(&[3, 7, 2]);        // Some(7)
largest(&[1.5, -2.0]);      // Some(1.5)
largest(&['a', 'z', 'q']);  // Some('z')
"#,
        live: demo_generic_functions,
    },
    Demonstration {
        title: "Generic Types",
        explanation: "Structs and enums take type parameters too; `Option<T>` and `Vec<T>` are ordinary generic types.",
        snippet: r#"
struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    fn new() -> Self { Self { items: Vec::new() } }
    fn push(&mut self, item: T) { self.items.push(item); }
    fn pop(&mut self) -> Option<T> { self.items.pop() }
    fn peek(&self) -> Option<&T> { self.items.last() }
}
"#,
        live: demo_generic_types,
    },
    Demonstration {
        title: "Macros for Variadic Arguments",
        explanation: "Rust functions have a fixed arity. `macro_rules!` repetitions accept any number of arguments.",
        snippet: r#"
macro_rules! sum_all {
    ($($x:expr),* $(,)?) => {
        0 $(+ $x)*
    };
}

let total = sum_all!(1, 2, 3, 4);   // expands to 0 + 1 + 2 + 3 + 4
"#,
        live: demo_macros,
    },
    Demonstration {
        title: "Trait Bounds and Associated Items",
        explanation: "`where` clauses keep complex bounds readable; associated constants and types\n\
                      attach compile-time information to a trait.",
        snippet: r#"
trait Unit {
    const SYMBOL: &'static str;
}

struct Meters;
impl Unit for Meters { const SYMBOL: &'static str = "m"; }

fn total<T, U>(values: &[T]) -> String
where
    T: Copy + Add<Output = T> + Default + Display,
    U: Unit,
{
    let sum = values.iter().fold(T::default(), |acc, &v| acc + v);
    format!("{sum}{}", U::SYMBOL)
}
"#,
        live: demo_bounds,
    },
    Demonstration {
        title: "Iterator Adaptors",
        explanation: "Iterator adaptors are generic building blocks that compile down to tight loops.",
        snippet: r#"
let squares_of_evens: Vec<u32> = (1..=10)
    .filter(|n| n % 2 == 0)
    .map(|n| n * n)
    .collect();

let (small, big): (Vec<u32>, Vec<u32>) =
    squares_of_evens.iter().partition(|&&n| n < 50);
"#,
        live: demo_iterators,
    },
];

fn largest<T: PartialOrd + Copy>(items: &[T]) -> Option<T> {
    let mut iter = items.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |max, x| if x > max { x } else { max }))
}

fn demo_generic_functions(console: &mut dyn Console) -> Result<(), LessonRunError> {
    console.text(&format!("largest(&[3, 7, 2]) = {:?}", largest(&[3, 7, 2])))?;
    console.text(&format!("largest(&[1.5, -2.0]) = {:?}", largest(&[1.5, -2.0])))?;
    console.text(&format!("largest(&['a', 'z', 'q']) = {:?}", largest(&['a', 'z', 'q'])))?;
    console.text(&format!("largest::<i32>(&[]) = {:?}", largest::<i32>(&[])))?;
    Ok(())
}

struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn push(&mut self, item: T) {
        self.items.push(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

fn demo_generic_types(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let mut numbers = Stack::new();
    for n in [1, 2, 3] {
        numbers.push(n);
    }
    console.text(&format!(
        "Stack<i32>: peek = {:?}, len = {}",
        numbers.peek(),
        numbers.len()
    ))?;
    console.text(&format!("Stack<i32>: pop = {:?}", numbers.pop()))?;

    let mut words: Stack<&str> = Stack::new();
    words.push("generic");
    words.push("types");
    console.text(&format!("Stack<&str>: pop = {:?}", words.pop()))?;
    Ok(())
}

macro_rules! sum_all {
    ($($x:expr),* $(,)?) => {
        0 $(+ $x)*
    };
}

macro_rules! describe_all {
    ($($x:expr),* $(,)?) => {
        vec![$(format!("{} = {:?}", stringify!($x), $x)),*]
    };
}

fn demo_macros(console: &mut dyn Console) -> Result<(), LessonRunError> {
    console.text(&format!("sum_all!(1, 2, 3, 4) = {}", sum_all!(1, 2, 3, 4)))?;
    console.text(&format!("sum_all!() = {}", sum_all!()))?;
    for line in describe_all!(1 + 1, "text", [1, 2]) {
        console.text(&line)?;
    }
    Ok(())
}

trait Unit {
    const SYMBOL: &'static str;
}

struct Meters;
struct Seconds;

impl Unit for Meters {
    const SYMBOL: &'static str = "m";
}

impl Unit for Seconds {
    const SYMBOL: &'static str = "s";
}

fn total<T, U>(values: &[T]) -> String
where
    T: Copy + Add<Output = T> + Default + Display,
    U: Unit,
{
    let sum = values.iter().fold(T::default(), |acc, &v| acc + v);
    format!("{sum}{}", U::SYMBOL)
}

fn demo_bounds(console: &mut dyn Console) -> Result<(), LessonRunError> {
    console.text(&format!("total::<_, Meters>(&[1, 2, 3]) = {}", total::<_, Meters>(&[1, 2, 3])))?;
    console.text(&format!(
        "total::<_, Seconds>(&[0.5, 1.25]) = {}",
        total::<_, Seconds>(&[0.5, 1.25])
    ))?;
    Ok(())
}

fn demo_iterators(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let squares_of_evens: Vec<u32> = (1..=10).filter(|n| n % 2 == 0).map(|n| n * n).collect();
    let (small, big): (Vec<u32>, Vec<u32>) = squares_of_evens.iter().partition(|&&n| n < 50);

    console.text(&format!("Squares of evens: {squares_of_evens:?}"))?;
    console.text(&format!("Below 50: {small:?}, the rest: {big:?}"))?;
    Ok(())
}
