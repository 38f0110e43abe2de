//! Level 2: structs, traits and dynamic dispatch.

use std::f64::consts::PI;
use std::fmt;

use quest_core::model::{CompletionPolicy, LessonInfo, LessonLevel};
use services::console::Console;
use services::{Demonstration, LessonPlan, LessonRunError};

use crate::error::CurriculumError;

pub struct TraitsLesson {
    info: LessonInfo,
    completion: CompletionPolicy,
}

impl TraitsLesson {
    /// # Errors
    ///
    /// Returns `CurriculumError` if the lesson metadata is invalid.
    pub fn new() -> Result<Self, CurriculumError> {
        Ok(Self {
            info: LessonInfo::new(
                "Traits & Object Orientation",
                "Model behaviour with structs, traits and trait objects",
                LessonLevel::new(2),
            )?,
            completion: CompletionPolicy::confirm(
                "Do you understand traits, trait objects and Drop/Clone?",
            ),
        })
    }
}

impl LessonPlan for TraitsLesson {
    fn info(&self) -> &LessonInfo {
        &self.info
    }

    fn greeting(&self) -> &str {
        "Let's build types with behaviour. Rust favours composition and traits over inheritance."
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
        title: "Structs and Methods",
        explanation: "Data lives in structs; behaviour lives in `impl` blocks.\n\
                      Fields are private to the module unless marked `pub`.",
        snippet: r#"
pub struct BankAccount {
    owner: String,
    balance: u64,
}

impl BankAccount {
    pub fn new(owner: impl Into<String>) -> Self {
        Self { owner: owner.into(), balance: 0 }
    }

    pub fn deposit(&mut self, amount: u64) {
        self.balance += amount;
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<(), String> {
        if amount > self.balance {
            return Err(format!("insufficient funds: {}", self.balance));
        }
        self.balance -= amount;
        Ok(())
    }
}
"#,
        live: demo_structs,
    },
    Demonstration {
        title: "Traits and Default Methods",
        explanation: "A trait is a contract. Default methods give shared behaviour without base classes.",
        snippet: r#"
trait Shape {
    fn name(&self) -> &str;
    fn area(&self) -> f64;

    // Default method, like a non-virtual base-class helper
    fn describe(&self) -> String {
        format!("{} with area {:.2}", self.name(), self.area())
    }
}

struct Circle { radius: f64 }

impl Shape for Circle {
    fn name(&self) -> &str { "Circle" }
    fn area(&self) -> f64 { std::f64::consts::PI * self.radius * self.radius }
}
"#,
        live: demo_traits,
    },
    Demonstration {
        title: "Polymorphism with Trait Objects",
        explanation: "`Box<dyn Trait>` stores different types behind one interface, dispatched through a vtable.\n\
                      Use generics instead when the concrete type is known at compile time.",
        snippet: r#"
let shapes: Vec<Box<dyn Shape>> = vec![
    Box::new(Circle { radius: 1.0 }),
    Box::new(Rectangle { width: 2.0, height: 3.0 }),
];

for shape in &shapes {
    println!("{}", shape.describe());   // dynamic dispatch
}

let total: f64 = shapes.iter().map(|s| s.area()).sum();
"#,
        live: demo_polymorphism,
    },
    Demonstration {
        title: "Clone, Copy and Drop",
        explanation: "Resource management is opt-in per type: derive `Clone` for explicit copies,\n\
                      `Copy` for cheap bitwise copies, and implement `Drop` for cleanup.",
        snippet: r#"
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point { x: i32, y: i32 }        // Copy: assignment duplicates

#[derive(Debug, Clone)]
struct Buffer { data: Vec<u8> }        // Clone only: copies must be explicit

impl Drop for Buffer {
    fn drop(&mut self) {
        println!("freeing {} bytes", self.data.len());
    }
}
"#,
        live: demo_clone_drop,
    },
];

struct BankAccount {
    owner: String,
    balance: u64,
}

impl BankAccount {
    fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            balance: 0,
        }
    }

    fn deposit(&mut self, amount: u64) {
        self.balance += amount;
    }

    fn withdraw(&mut self, amount: u64) -> Result<(), String> {
        if amount > self.balance {
            return Err(format!("insufficient funds: balance is {}", self.balance));
        }
        self.balance -= amount;
        Ok(())
    }
}

fn demo_structs(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let mut account = BankAccount::new("Ferris");
    account.deposit(100);
    console.text(&format!(
        "{} deposited 100, balance {}",
        account.owner, account.balance
    ))?;

    match account.withdraw(30) {
        Ok(()) => console.text(&format!("Withdrew 30, balance {}", account.balance))?,
        Err(e) => console.text(&format!("Withdraw failed: {e}"))?,
    }
    match account.withdraw(500) {
        Ok(()) => console.text(&format!("Withdrew 500, balance {}", account.balance))?,
        Err(e) => console.text(&format!("Withdraw of 500 refused: {e}"))?,
    }
    Ok(())
}

trait Shape {
    fn name(&self) -> &str;
    fn area(&self) -> f64;

    fn describe(&self) -> String {
        format!("{} with area {:.2}", self.name(), self.area())
    }
}

struct Circle {
    radius: f64,
}

struct Rectangle {
    width: f64,
    height: f64,
}

impl Shape for Circle {
    fn name(&self) -> &str {
        "Circle"
    }

    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

impl Shape for Rectangle {
    fn name(&self) -> &str {
        "Rectangle"
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn describe(&self) -> String {
        format!("{}x{} rectangle, area {:.2}", self.width, self.height, self.area())
    }
}

fn demo_traits(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let circle = Circle { radius: 1.0 };
    let rect = Rectangle {
        width: 2.0,
        height: 3.0,
    };
    console.text(&format!("Default method: {}", circle.describe()))?;
    console.text(&format!("Overridden method: {}", rect.describe()))?;
    Ok(())
}

fn demo_polymorphism(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(Circle { radius: 1.0 }),
        Box::new(Rectangle {
            width: 2.0,
            height: 3.0,
        }),
        Box::new(Circle { radius: 0.5 }),
    ];

    for shape in &shapes {
        console.text(&format!("• {}", shape.describe()))?;
    }
    let total: f64 = shapes.iter().map(|s| s.area()).sum();
    console.text(&format!("Total area of {} shapes: {total:.2}", shapes.len()))?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone)]
struct Buffer {
    data: Vec<u8>,
}

fn demo_clone_drop(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let a = Point { x: 1, y: 2 };
    let mut b = a;
    b.x = 10;
    console.text(&format!("Copy: a = {a}, b = {b}, a unchanged"))?;

    let original = Buffer {
        data: vec![1, 2, 3, 4],
    };
    let mut copy = original.clone();
    copy.data.push(5);
    console.text(&format!(
        "Clone: original has {} bytes, copy has {} bytes",
        original.data.len(),
        copy.data.len()
    ))?;

    let freed = copy.data.len();
    drop(copy);
    console.text(&format!("Explicit drop released {freed} bytes early"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::ScriptedConsole;

    #[test]
    fn traits_lesson_metadata() {
        let lesson = TraitsLesson::new().unwrap();
        assert_eq!(lesson.info().level(), LessonLevel::new(2));
        assert!(lesson.info().name().contains("Traits"));
    }

    #[test]
    fn withdraw_refuses_overdraft() {
        let mut account = BankAccount::new("x");
        account.deposit(10);
        assert!(account.withdraw(11).is_err());
        assert_eq!(account.balance, 10);
    }

    #[test]
    fn polymorphism_sums_every_area() {
        let console = ScriptedConsole::new();
        demo_polymorphism(&mut console.clone()).unwrap();
        // PI + 6 + PI / 4
        assert!(console.transcript().contains("Total area of 3 shapes: 9.93"));
    }
}
