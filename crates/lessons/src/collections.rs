//! Level 4: standard collections, iterators and algorithms.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet, VecDeque};

use quest_core::model::{CompletionPolicy, LessonInfo, LessonLevel};
use services::console::Console;
use services::{Demonstration, LessonPlan, LessonRunError};

use crate::error::CurriculumError;
use crate::quiz_bank;

pub struct CollectionsLesson {
    info: LessonInfo,
    completion: CompletionPolicy,
}

impl CollectionsLesson {
    /// # Errors
    ///
    /// Returns `CurriculumError` if the metadata or the bundled quiz is invalid.
    pub fn new() -> Result<Self, CurriculumError> {
        let (bank, raw) = quiz_bank::COLLECTIONS;
        Ok(Self {
            info: LessonInfo::new(
                "Collections & Iterators",
                "Pick the right standard collection and process it with iterators",
                LessonLevel::new(4),
            )?,
            completion: CompletionPolicy::Quiz(quiz_bank::load(bank, raw)?),
        })
    }
}

impl LessonPlan for CollectionsLesson {
    fn info(&self) -> &LessonInfo {
        &self.info
    }

    fn greeting(&self) -> &str {
        "The standard library ships a small, sharp set of collections. Let's tour them."
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
        title: "Sequence Collections",
        explanation: "`Vec` is the default choice. `VecDeque` is a ring buffer with cheap pushes at both ends.",
        snippet: r#"
let mut v = vec![3, 1, 4];
v.push(1);
v.extend([5, 9]);

use std::collections::VecDeque;
let mut dq = VecDeque::from([2, 3]);
dq.push_front(1);
dq.push_back(4);
"#,
        live: demo_sequences,
    },
    Demonstration {
        title: "Maps and Sets",
        explanation: "`HashMap`/`HashSet` give O(1) average lookups; `BTreeMap`/`BTreeSet` keep keys sorted.",
        snippet: r#"
use std::collections::{BTreeMap, HashMap, HashSet};

let mut counts: HashMap<&str, u32> = HashMap::new();
for word in "the cat saw the dog".split_whitespace() {
    *counts.entry(word).or_insert(0) += 1;
}

let sorted: BTreeMap<_, _> = counts.iter().collect();
let unique: HashSet<char> = "mississippi".chars().collect();
"#,
        live: demo_maps,
    },
    Demonstration {
        title: "Heaps and Queues",
        explanation: "`BinaryHeap` is a max-heap priority queue; `Reverse` turns it into a min-heap.",
        snippet: r#"
use std::cmp::Reverse;
use std::collections::BinaryHeap;

let mut tasks = BinaryHeap::new();
tasks.push((2, "write tests"));
tasks.push((5, "fix outage"));
tasks.push((1, "refactor"));
tasks.pop();  // Some((5, "fix outage"))

let mut min_heap = BinaryHeap::from([Reverse(7), Reverse(3), Reverse(9)]);
min_heap.pop(); // Some(Reverse(3))
"#,
        live: demo_heaps,
    },
    Demonstration {
        title: "Iterators",
        explanation: "Every collection exposes `iter`, `iter_mut` and `into_iter`; adaptors chain lazily.",
        snippet: r#"
let names = vec!["ada", "grace", "linus"];

for (i, name) in names.iter().enumerate() {
    println!("{i}: {name}");
}

let shouted: Vec<String> = names.iter().map(|n| n.to_uppercase()).collect();
let total_len: usize = names.iter().map(|n| n.len()).sum();
"#,
        live: demo_iterators,
    },
    Demonstration {
        title: "Algorithms",
        explanation: "Sorting, searching and de-duplication are methods on slices and vectors.",
        snippet: r#"
let mut data = vec![5, 3, 8, 3, 1, 8, 9];
data.sort_unstable();               // [1, 3, 3, 5, 8, 8, 9]
data.dedup();                       // [1, 3, 5, 8, 9]
let found = data.binary_search(&8); // Ok(3)
data.retain(|&x| x % 2 == 1);       // [1, 3, 5, 9]
let max = data.iter().max();        // Some(9)
"#,
        live: demo_algorithms,
    },
];

fn demo_sequences(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let mut v = vec![3, 1, 4];
    v.push(1);
    v.extend([5, 9]);
    console.text(&format!("Vec after push/extend: {v:?}, len {}", v.len()))?;

    let mut dq = VecDeque::from([2, 3]);
    dq.push_front(1);
    dq.push_back(4);
    console.text(&format!("VecDeque after push_front/push_back: {dq:?}"))?;
    console.text(&format!("pop_front = {:?}, pop_back = {:?}", dq.pop_front(), dq.pop_back()))?;
    Ok(())
}

fn demo_maps(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for word in "the cat saw the dog".split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }
    let sorted: BTreeMap<_, _> = counts.iter().collect();
    console.text(&format!("Word counts (sorted by BTreeMap): {sorted:?}"))?;

    let unique: HashSet<char> = "mississippi".chars().collect();
    let mut letters: Vec<_> = unique.into_iter().collect();
    letters.sort_unstable();
    console.text(&format!("Unique letters in \"mississippi\": {letters:?}"))?;
    Ok(())
}

fn demo_heaps(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let mut tasks = BinaryHeap::new();
    tasks.push((2, "write tests"));
    tasks.push((5, "fix outage"));
    tasks.push((1, "refactor"));

    let mut order = Vec::new();
    while let Some((priority, task)) = tasks.pop() {
        order.push(format!("{task} (p{priority})"));
    }
    console.text(&format!("Max-heap order: {}", order.join(" → ")))?;

    let mut min_heap = BinaryHeap::from([Reverse(7), Reverse(3), Reverse(9)]);
    let smallest = min_heap.pop().map(|Reverse(n)| n);
    console.text(&format!("Min-heap pop with Reverse: {smallest:?}"))?;
    Ok(())
}

fn demo_iterators(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let names = ["ada", "grace", "linus"];
    for (i, name) in names.iter().enumerate() {
        console.text(&format!("{i}: {name}"))?;
    }
    let shouted: Vec<String> = names.iter().map(|n| n.to_uppercase()).collect();
    let total_len: usize = names.iter().map(|n| n.len()).sum();
    console.text(&format!("Uppercased: {shouted:?}, total length {total_len}"))?;
    Ok(())
}

fn demo_algorithms(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let mut data = vec![5, 3, 8, 3, 1, 8, 9];
    data.sort_unstable();
    console.text(&format!("sorted:  {data:?}"))?;
    data.dedup();
    console.text(&format!("dedup:   {data:?}"))?;
    console.text(&format!("binary_search(&8) = {:?}", data.binary_search(&8)))?;
    data.retain(|&x| x % 2 == 1);
    console.text(&format!("odd only: {data:?}, max = {:?}", data.iter().max()))?;
    Ok(())
}
