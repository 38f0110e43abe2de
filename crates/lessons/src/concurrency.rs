//! Level 5: threads, synchronisation, channels and async tasks.
//!
//! Every live demonstration joins its workers before printing, so the
//! output is identical from run to run.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use quest_core::model::{CompletionPolicy, LessonInfo, LessonLevel};
use services::console::Console;
use services::{Demonstration, LessonPlan, LessonRunError};

use crate::error::CurriculumError;
use crate::quiz_bank;

pub struct ConcurrencyLesson {
    info: LessonInfo,
    completion: CompletionPolicy,
}

impl ConcurrencyLesson {
    /// # Errors
    ///
    /// Returns `CurriculumError` if the metadata or the bundled quiz is invalid.
    pub fn new() -> Result<Self, CurriculumError> {
        let (bank, raw) = quiz_bank::CONCURRENCY;
        Ok(Self {
            info: LessonInfo::new(
                "Concurrency & Parallelism",
                "Share work safely between threads and async tasks",
                LessonLevel::new(5),
            )?,
            completion: CompletionPolicy::Quiz(quiz_bank::load(bank, raw)?),
        })
    }
}

impl LessonPlan for ConcurrencyLesson {
    fn info(&self) -> &LessonInfo {
        &self.info
    }

    fn greeting(&self) -> &str {
        "Fearless concurrency: the type system rules out data races at compile time."
    }

    fn demonstrations(&self) -> &[Demonstration] {
        DEMONSTRATIONS
    }

    fn completion(&self) -> &CompletionPolicy {
        &self.completion
    }

    fn retry_hint(&self) -> &str {
        "Concurrency is complex! Practice with small examples and study race conditions."
    }
}

const DEMONSTRATIONS: &[Demonstration] = &[
    Demonstration {
        title: "Spawning Threads",
        explanation: "`thread::spawn` runs a closure on a new OS thread. `move` hands ownership\n\
                      of captured values to the thread, and `join` waits for its result.",
        snippet: r#"
use std::thread;

let handles: Vec<_> = (0..3)
    .map(|id| thread::spawn(move || id * 10))
    .collect();

for handle in handles {
    let value = handle.join().expect("worker panicked");
    println!("worker returned {value}");
}
"#,
        live: demo_threads,
    },
    Demonstration {
        title: "Shared State with Mutex and Condvar",
        explanation: "`Arc<Mutex<T>>` shares mutable state; the guard unlocks on drop.\n\
                      A `Condvar` lets a thread sleep until another one signals a change.",
        snippet: r#"
use std::sync::{Arc, Condvar, Mutex};

let counter = Arc::new(Mutex::new(0));
let ready = Arc::new((Mutex::new(false), Condvar::new()));

let (lock, cvar) = &*ready;
let mut done = lock.lock().unwrap();
while !*done {
    done = cvar.wait(done).unwrap();
}
"#,
        live: demo_shared_state,
    },
    Demonstration {
        title: "Message Passing",
        explanation: "Channels move values between threads instead of sharing them.\n\
                      The receiver iterator ends once every sender is dropped.",
        snippet: r#"
use std::sync::mpsc;

let (tx, rx) = mpsc::channel();
for id in 0..3 {
    let tx = tx.clone();
    thread::spawn(move || tx.send(format!("hello from {id}")).unwrap());
}
drop(tx);

let mut messages: Vec<String> = rx.iter().collect();
"#,
        live: demo_channels,
    },
    Demonstration {
        title: "Async Tasks",
        explanation: "`async fn` returns a future. A runtime such as tokio polls many futures\n\
                      on a few threads, which suits I/O-bound work.",
        snippet: r#"
async fn fetch(id: u32, delay_ms: u64) -> String {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    format!("response {id}")
}

let rt = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
let (a, b) = rt.block_on(async { tokio::join!(fetch(1, 20), fetch(2, 5)) });
"#,
        live: demo_async,
    },
    Demonstration {
        title: "Atomics and Scoped Threads",
        explanation: "Atomics update a single value without locking. `thread::scope` joins every\n\
                      thread before returning, so workers may borrow local data.",
        snippet: r#"
use std::sync::atomic::{AtomicUsize, Ordering};

let hits = AtomicUsize::new(0);
let data: Vec<u64> = (1..=100).collect();

let sums: Vec<u64> = thread::scope(|s| {
    let workers: Vec<_> = data
        .chunks(25)
        .map(|chunk| s.spawn(|| {
            hits.fetch_add(1, Ordering::Relaxed);
            chunk.iter().sum::<u64>()
        }))
        .collect();
    workers.into_iter().map(|w| w.join().unwrap()).collect()
});
"#,
        live: demo_atomics_scoped,
    },
];

fn demo_threads(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let handles: Vec<_> = (0..3_u32)
        .map(|id| thread::spawn(move || id * 10))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.join().map_err(|_| LessonRunError::WorkerPanicked)?);
    }
    for (id, value) in results.iter().enumerate() {
        console.text(&format!("worker {id} returned {value}"))?;
    }
    Ok(())
}

/// Bump `counter` once per iteration, taking the lock each time.
fn increment(counter: &Mutex<u32>, times: u32) -> Result<(), LessonRunError> {
    for _ in 0..times {
        let mut n = counter.lock().map_err(|_| LessonRunError::WorkerPanicked)?;
        *n += 1;
    }
    Ok(())
}

fn demo_shared_state(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let counter = Arc::new(Mutex::new(0_u32));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || increment(&counter, 250))
        })
        .collect();
    for handle in handles {
        handle.join().map_err(|_| LessonRunError::WorkerPanicked)??;
    }
    let total = *counter.lock().map_err(|_| LessonRunError::WorkerPanicked)?;
    console.text(&format!("4 threads x 250 increments under a Mutex = {total}"))?;

    let ready = Arc::new((Mutex::new(None::<&'static str>), Condvar::new()));
    let producer = {
        let ready = Arc::clone(&ready);
        thread::spawn(move || {
            let (lock, cvar) = &*ready;
            let mut slot = lock.lock().map_err(|_| LessonRunError::WorkerPanicked)?;
            *slot = Some("data prepared");
            cvar.notify_one();
            Ok::<_, LessonRunError>(())
        })
    };

    let received = {
        let (lock, cvar) = &*ready;
        let mut slot = lock.lock().map_err(|_| LessonRunError::WorkerPanicked)?;
        while slot.is_none() {
            slot = cvar.wait(slot).map_err(|_| LessonRunError::WorkerPanicked)?;
        }
        slot.take()
    };
    producer.join().map_err(|_| LessonRunError::WorkerPanicked)??;
    console.text(&format!("Condvar woke the consumer with: {received:?}"))?;
    Ok(())
}

fn demo_channels(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let (tx, rx) = mpsc::channel();
    let handles: Vec<_> = (0..3)
        .map(|id| {
            let tx = tx.clone();
            thread::spawn(move || {
                // The receiver outlives every sender here.
                let _ = tx.send(format!("hello from worker {id}"));
            })
        })
        .collect();
    drop(tx);

    for handle in handles {
        handle.join().map_err(|_| LessonRunError::WorkerPanicked)?;
    }
    let mut messages: Vec<String> = rx.iter().collect();
    messages.sort();
    for message in &messages {
        console.text(message)?;
    }
    console.text(&format!("Channel closed after {} messages", messages.len()))?;
    Ok(())
}

async fn fetch(id: u32, delay: Duration) -> String {
    tokio::time::sleep(delay).await;
    format!("response {id} after {}ms", delay.as_millis())
}

fn demo_async(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(LessonRunError::Demonstration)?;

    let (first, second) = runtime.block_on(async {
        tokio::join!(
            fetch(1, Duration::from_millis(20)),
            fetch(2, Duration::from_millis(5))
        )
    });
    tracing::debug!("async demonstration finished");

    console.text(&format!("join! waited for both: {first}, {second}"))?;
    Ok(())
}

fn demo_atomics_scoped(console: &mut dyn Console) -> Result<(), LessonRunError> {
    let hits = AtomicUsize::new(0);
    let data: Vec<u64> = (1..=100).collect();

    let sums = thread::scope(|s| {
        let workers: Vec<_> = data
            .chunks(25)
            .map(|chunk| {
                let hits = &hits;
                s.spawn(move || {
                    hits.fetch_add(1, Ordering::Relaxed);
                    chunk.iter().sum::<u64>()
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|w| w.join().map_err(|_| LessonRunError::WorkerPanicked))
            .collect::<Result<Vec<u64>, _>>()
    })?;

    console.text(&format!("Chunk sums: {sums:?}"))?;
    console.text(&format!(
        "Total {} from {} scoped workers",
        sums.iter().sum::<u64>(),
        hits.load(Ordering::Relaxed)
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::ScriptedConsole;

    #[test]
    fn concurrency_lesson_needs_four_of_five() {
        let lesson = ConcurrencyLesson::new().unwrap();
        assert_eq!(lesson.info().level(), LessonLevel::new(5));
        let quiz = lesson.completion().quiz().unwrap();
        assert_eq!(quiz.len(), 5);
        assert_eq!(quiz.pass_threshold(), 4);
    }

    #[test]
    fn thread_results_print_in_spawn_order() {
        let console = ScriptedConsole::new();
        demo_threads(&mut console.clone()).unwrap();
        assert_eq!(
            console.transcript(),
            "worker 0 returned 0\nworker 1 returned 10\nworker 2 returned 20\n"
        );
    }

    #[test]
    fn mutex_counter_sees_every_increment() {
        let console = ScriptedConsole::new();
        demo_shared_state(&mut console.clone()).unwrap();
        let out = console.transcript();
        assert!(out.contains("= 1000"));
        assert!(out.contains("Some(\"data prepared\")"));
    }

    #[test]
    fn poisoned_counter_stops_the_worker() {
        let counter = Arc::new(Mutex::new(0_u32));
        let poisoner = Arc::clone(&counter);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("worker died holding the lock");
        })
        .join();

        assert!(matches!(
            increment(&counter, 3),
            Err(LessonRunError::WorkerPanicked)
        ));
    }

    #[test]
    fn increment_counts_every_call() {
        let counter = Mutex::new(5_u32);
        increment(&counter, 3).unwrap();
        assert_eq!(*counter.lock().unwrap(), 8);
    }

    #[test]
    fn channel_collects_every_message() {
        let console = ScriptedConsole::new();
        demo_channels(&mut console.clone()).unwrap();
        assert!(console.transcript().contains("Channel closed after 3 messages"));
    }

    #[test]
    fn join_macro_returns_in_argument_order() {
        let console = ScriptedConsole::new();
        demo_async(&mut console.clone()).unwrap();
        assert!(console
            .transcript()
            .contains("response 1 after 20ms, response 2 after 5ms"));
    }

    #[test]
    fn scoped_workers_sum_the_range() {
        let console = ScriptedConsole::new();
        demo_atomics_scoped(&mut console.clone()).unwrap();
        let out = console.transcript();
        assert!(out.contains("Chunk sums: [325, 950, 1575, 2200]"));
        assert!(out.contains("Total 5050 from 4 scoped workers"));
    }
}
