#![cfg(feature = "async")]
//! Integration tests for ReaderTask.
//!
//! Tests cover:
//! - Environment access and local modification
//! - Lifting Reader, Task and IO through the dictionaries
//! - Par and Seq application against a shared environment
//! - Traversal with an environment

use kindred::control::NonEmptyVec;
use kindred::effect::{IO, Reader, ReaderTask, ReaderTaskPar, ReaderTaskSeq, Task};
use kindred::typeclass::{Provides, applicative, lift};
use parking_lot::Mutex;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Settings {
    prefix: String,
    factor: i32,
}

#[derive(Debug, Clone)]
struct Wide {
    settings: Settings,
    name: &'static str,
}

impl Provides<Settings> for Wide {
    fn provide(&self) -> Settings {
        self.settings.clone()
    }
}

fn settings() -> Settings {
    Settings {
        prefix: "id-".to_string(),
        factor: 3,
    }
}

// =============================================================================
// Environment
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_ask_and_asks() {
    let prefix = ReaderTask::asks(|settings: Settings| settings.prefix);
    assert_eq!(prefix.run(settings()).await, "id-");

    let whole: ReaderTask<i32, i32> = ReaderTask::ask();
    assert_eq!(whole.run(5).await, 5);
}

#[rstest]
#[tokio::test]
async fn test_flat_map_reuses_environment() {
    let labelled = ReaderTask::asks(|settings: Settings| settings.factor * 7).flat_map(|product| {
        ReaderTask::asks(move |settings: Settings| format!("{}{product}", settings.prefix))
    });
    assert_eq!(labelled.run(settings()).await, "id-21");
}

#[rstest]
#[tokio::test]
async fn test_local_and_widen_environment() {
    let factor = ReaderTask::asks(|settings: Settings| settings.factor);

    let local = factor.clone().local(|factor: i32| Settings {
        prefix: String::new(),
        factor,
    });
    assert_eq!(local.run(11).await, 11);

    let widened: ReaderTask<Wide, i32> = factor.widen_environment();
    let wide = Wide {
        settings: settings(),
        name: "wide",
    };
    assert_eq!(widened.run(wide.clone()).await, 3);
    assert_eq!(wide.name, "wide");
}

#[rstest]
#[tokio::test]
async fn test_asks_reader_task_chooses_effect_from_environment() {
    let chosen = ReaderTask::asks_reader_task(|environment: &i32| {
        if *environment > 0 {
            ReaderTask::of("positive")
        } else {
            ReaderTask::of("not positive")
        }
    });
    assert_eq!(chosen.run(1).await, "positive");
    assert_eq!(chosen.run(-1).await, "not positive");
}

// =============================================================================
// Lifting
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_lifting_through_dictionary() {
    let instance = ReaderTaskSeq::<Settings>::new();

    let from_reader = lift::from_reader_k(instance, |offset: i32| {
        Reader::asks(move |settings: Settings| settings.factor + offset)
    })(10);
    assert_eq!(from_reader.run(settings()).await, 13);

    let from_task = lift::from_task_k(instance, |value: i32| Task::of(value * 2))(4);
    assert_eq!(from_task.run(settings()).await, 8);

    let from_io = lift::flat_map_io_k(instance, ReaderTask::of(2), |value| IO::of(value + 1));
    assert_eq!(from_io.run(settings()).await, 3);

    let projected = lift::asks(instance, |settings: Settings| settings.prefix.len());
    assert_eq!(projected.run(settings()).await, 3);
}

#[rstest]
#[tokio::test]
async fn test_from_reader_and_from_task() {
    let reader = ReaderTask::from_reader(Reader::asks(|n: i32| n + 1));
    assert_eq!(reader.run(1).await, 2);

    let task: ReaderTask<i32, &str> = ReaderTask::from_task(Task::of("ignored"));
    assert_eq!(task.run(99).await, "ignored");
}

// =============================================================================
// Par and Seq
// =============================================================================

fn recorded(log: &Arc<Mutex<Vec<String>>>, name: &'static str, wait: u64) -> ReaderTask<Settings, String> {
    let log = Arc::clone(log);
    ReaderTask::new(move |settings: Settings| {
        let log = Arc::clone(&log);
        async move {
            log.lock().push(format!("start {name}"));
            tokio::time::sleep(Duration::from_millis(wait)).await;
            log.lock().push(format!("end {name}"));
            format!("{}{name}", settings.prefix)
        }
    })
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_par_lift2_starts_both_before_either_finishes() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let combined = applicative::lift2(
        ReaderTaskPar::new(),
        |a: String, b: String| format!("{a},{b}"),
        recorded(&log, "a", 30),
        recorded(&log, "b", 10),
    );

    assert_eq!(combined.run(settings()).await, "id-a,id-b");
    assert_eq!(*log.lock(), vec!["start a", "start b", "end b", "end a"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_seq_lift2_finishes_first_before_starting_second() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let combined = applicative::lift2(
        ReaderTaskSeq::new(),
        |a: String, b: String| format!("{a},{b}"),
        recorded(&log, "a", 30),
        recorded(&log, "b", 10),
    );

    assert_eq!(combined.run(settings()).await, "id-a,id-b");
    assert_eq!(*log.lock(), vec!["start a", "end a", "start b", "end b"]);
}

// =============================================================================
// Traversal
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_traverse_vec_with_index_reads_environment() {
    let traversal = ReaderTask::traverse_vec_with_index(vec!["x", "y"], |index, item| {
        ReaderTask::asks(move |settings: Settings| format!("{}{index}{item}", settings.prefix))
    });
    assert_eq!(
        traversal.run(settings()).await,
        vec!["id-0x".to_string(), "id-1y".to_string()]
    );
}

#[rstest]
#[tokio::test]
async fn test_traverse_non_empty_seq() {
    let traversal = ReaderTask::traverse_non_empty_seq(NonEmptyVec::new(1, vec![2]), |n: i32| {
        ReaderTask::asks(move |settings: Settings| n * settings.factor)
    });
    assert_eq!(traversal.run(settings()).await, NonEmptyVec::new(3, vec![6]));
}
