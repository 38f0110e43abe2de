//! Level 1: ownership, RAII and smart pointers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use quest_core::model::{CompletionPolicy, LessonInfo, LessonLevel};
use services::console::Console;
use services::{Demonstration, LessonPlan, LessonRunError};

use crate::error::CurriculumError;

pub struct OwnershipLesson {
    info: LessonInfo,
    completion: CompletionPolicy,
}

impl OwnershipLesson {
    /// # Errors
    ///
    /// Returns `CurriculumError` if the lesson metadata is invalid.
    pub fn new() -> Result<Self, CurriculumError> {
        Ok(Self {
            info: LessonInfo::new(
                "Ownership & Memory",
                "Master ownership, borrowing, RAII and smart pointers",
                LessonLevel::new(1),
            )?,
            completion: CompletionPolicy::confirm("Do you understand ownership and smart pointers?"),
        })
    }
}

impl LessonPlan for OwnershipLesson {
    fn info(&self) -> &LessonInfo {
        &self.info
    }

    fn greeting(&self) -> &str {
        "Time to master memory management! This is where Rust really shines."
    }

    fn demonstrations(&self) -> &[Demonstration] {
        DEMONSTRATIONS
    }

    fn completion(&self) -> &CompletionPolicy {
        &self.completion
    }

    fn retry_hint(&self) -> &str {
        "Ownership takes practice. Review the examples and try again!"
    }
}

const DEMONSTRATIONS: &[Demonstration] = &[
    Demonstration {
        title: "Stack vs Heap Memory",
        explanation: "Understanding where your values live is crucial for performance.\n\
                      Fixed-size values sit on the stack; `Box`, `Vec` and `String` own heap buffers.",
        snippet: r#"
fn stack_example() {
    let local = 42;            // lives on the stack
    let v = vec![1, 2, 3];     // Vec header on the stack, elements on the heap
}                              // both freed here, no delete needed

fn heap_example() {
    let boxed = Box::new(42);  // single value on the heap
    println!("{}", *boxed);
}                              // Box frees its allocation when dropped
"#,
        live: demo_stack_heap,
    },
    Demonstration {
        title: "RAII with Drop",
        explanation: "Resources are released when their owner goes out of scope.\n\
                      Implement `Drop` to run cleanup code deterministically.",
        snippet: r#"
struct FileHandle { name: String }

impl Drop for FileHandle {
    fn drop(&mut self) {
        println!("closing {}", self.name);
    }
}

{
    let _log = FileHandle { name: "app.log".into() };
    let _data = FileHandle { name: "data.bin".into() };
} // dropped in reverse order: data.bin, then app.log
"#,
        live: demo_raii,
    },
    Demonstration {
        title: "Smart Pointers",
        explanation: "`Box` owns one value, `Rc` shares ownership on one thread, `Arc` shares across threads,\n\
                      and `Weak` observes without keeping the value alive.",
        snippet: r#"
use std::rc::{Rc, Weak};
use std::sync::Arc;

let unique = Box::new(5);

let shared = Rc::new(String::from("shared"));
let other = Rc::clone(&shared);          // count is now 2

let observer: Weak<String> = Rc::downgrade(&shared);
assert!(observer.upgrade().is_some());   // still alive

let across_threads = Arc::new(vec![1, 2, 3]);
"#,
        live: demo_smart_pointers,
    },
    Demonstration {
        title: "Move Semantics and Borrowing",
        explanation: "Assignment moves ownership by default; borrowing lends access without moving.\n\
                      The borrow checker allows many `&T` or one `&mut T` at a time.",
        snippet: r#"
let s1 = String::from("hello");
let s2 = s1;               // s1 is moved; using it now is a compile error

let len = length(&s2);     // borrow, s2 still usable
fn length(s: &str) -> usize { s.len() }

let mut buf = String::new();
push_world(&mut buf);      // exclusive mutable borrow
fn push_world(s: &mut String) { s.push_str("world"); }

let copy = s2.clone();     // explicit deep copy
"#,
        live: demo_moves,
    },
];

fn demo_stack_heap(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let on_stack = 42_u64;
    let boxed = Box::new(on_stack);
    let v = vec![1_u32, 2, 3];

    console.text(&format!(
        "Stack value: {on_stack} ({} bytes)",
        std::mem::size_of_val(&on_stack)
    ))?;
    console.text(&format!(
        "Box<u64> is a pointer of {} bytes pointing at {}",
        std::mem::size_of::<Box<u64>>(),
        *boxed
    ))?;
    console.text(&format!(
        "Vec header is {} bytes; its {} elements live on the heap",
        std::mem::size_of::<Vec<u32>>(),
        v.len()
    ))?;
    Ok(())
}

/// Records its name into a shared log when dropped.
struct Tracked {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.borrow_mut().push(self.name);
    }
}

fn demo_raii(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let log = Rc::new(RefCell::new(Vec::new()));
    {
        let _first = Tracked {
            name: "app.log",
            log: Rc::clone(&log),
        };
        let _second = Tracked {
            name: "data.bin",
            log: Rc::clone(&log),
        };
        console.text("Opened app.log and data.bin inside a block")?;
    }

    let order = log.borrow().join(", ");
    console.text(&format!("Closed on scope exit, in reverse order: {order}"))?;
    Ok(())
}

fn demo_smart_pointers(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let unique = Box::new(5);
    console.text(&format!("Box holds {}", *unique))?;

    let shared = Rc::new(String::from("shared"));
    let observer: Weak<String> = Rc::downgrade(&shared);
    {
        let _other = Rc::clone(&shared);
        console.text(&format!(
            "Rc strong count with two owners: {}",
            Rc::strong_count(&shared)
        ))?;
    }
    console.text(&format!(
        "Rc strong count after one owner dropped: {}",
        Rc::strong_count(&shared)
    ))?;

    drop(shared);
    console.text(&format!(
        "Weak upgrade after last owner dropped: {:?}",
        observer.upgrade()
    ))?;

    let across = Arc::new(vec![1, 2, 3]);
    let cloned = Arc::clone(&across);
    console.text(&format!(
        "Arc shares {:?} between {} owners",
        cloned,
        Arc::strong_count(&across)
    ))?;
    Ok(())
}

fn demo_moves(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let s1 = String::from("hello");
    let s2 = s1;
    console.text(&format!("Moved string: {s2}"))?;

    let borrowed_len = s2.len();
    console.text(&format!("Borrowed length: {borrowed_len}, owner still usable: {s2}"))?;

    let mut buf = String::from("hello ");
    push_world(&mut buf);
    console.text(&format!("After mutable borrow: {buf}"))?;

    let copy = s2.clone();
    console.text(&format!("Clone is independent: {copy} / {s2}"))?;
    Ok(())
}

fn push_world(s: &mut String) {
    s.push_str("world");
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::ScriptedConsole;

    #[test]
    fn ownership_lesson_metadata() {
        let lesson = OwnershipLesson::new().unwrap();
        assert_eq!(lesson.info().name(), "Ownership & Memory");
        assert_eq!(lesson.info().level(), LessonLevel::new(1));
        assert_eq!(lesson.demonstrations().len(), 4);
    }

    #[test]
    fn drop_runs_in_reverse_declaration_order() {
        let console = ScriptedConsole::new();
        demo_raii(&mut console.clone()).unwrap();
        assert!(console.transcript().contains("reverse order: data.bin, app.log"));
    }

    #[test]
    fn weak_pointer_dies_with_owner() {
        let console = ScriptedConsole::new();
        demo_smart_pointers(&mut console.clone()).unwrap();
        let out = console.transcript();
        assert!(out.contains("two owners: 2"));
        assert!(out.contains("one owner dropped: 1"));
        assert!(out.contains("last owner dropped: None"));
    }
}
