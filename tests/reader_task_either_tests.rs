#![cfg(feature = "async")]
//! Integration tests for ReaderTaskEither.
//!
//! Tests cover:
//! - Constructors lifting every narrower effect, predicates and refinements
//! - Error widening across chains (`flat_map_w`, `widen`)
//! - Environment widening through `Provides`
//! - Recovery (`or_else`, `get_or_else`, `get_or_else_e`)
//! - The K-variants chaining narrower effects

use kindred::control::Either;
use kindred::effect::{IO, Reader, ReaderTask, ReaderTaskEither, Task};
use kindred::typeclass::Provides;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Letters {
    A1,
    A2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Widened {
    Letters(Letters),
    Number(i64),
}

impl From<Letters> for Widened {
    fn from(letters: Letters) -> Self {
        Self::Letters(letters)
    }
}

impl From<i64> for Widened {
    fn from(number: i64) -> Self {
        Self::Number(number)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Database {
    url: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Limits {
    max_rows: usize,
}

#[derive(Debug, Clone)]
struct Application {
    database: Database,
    limits: Limits,
}

impl Provides<Database> for Application {
    fn provide(&self) -> Database {
        self.database.clone()
    }
}

impl Provides<Limits> for Application {
    fn provide(&self) -> Limits {
        self.limits.clone()
    }
}

fn application() -> Application {
    Application {
        database: Database {
            url: "postgres://db".to_string(),
        },
        limits: Limits { max_rows: 3 },
    }
}

// =============================================================================
// Error widening
// =============================================================================

fn letter_effect(fail_with: Option<Letters>) -> ReaderTaskEither<(), Letters, i64> {
    match fail_with {
        Some(letters) => ReaderTaskEither::left(letters),
        None => ReaderTaskEither::right(7),
    }
}

fn number_effect(value: i64) -> ReaderTaskEither<(), i64, i64> {
    if value > 5 {
        ReaderTaskEither::left(value)
    } else {
        ReaderTaskEither::right(value * 2)
    }
}

#[rstest]
#[case(Some(Letters::A1), Either::Left(Widened::Letters(Letters::A1)))]
#[case(Some(Letters::A2), Either::Left(Widened::Letters(Letters::A2)))]
#[case(None, Either::Left(Widened::Number(7)))]
#[tokio::test]
async fn test_flat_map_w_unions_error_types(
    #[case] fail_with: Option<Letters>,
    #[case] expected: Either<Widened, i64>,
) {
    let widened: ReaderTaskEither<(), Widened, i64> =
        letter_effect(fail_with).flat_map_w(number_effect);
    assert_eq!(widened.run(()).await, expected);
}

#[rstest]
#[tokio::test]
async fn test_ap_w_merges_environments_and_errors() {
    let function: ReaderTaskEither<Database, Letters, Box<dyn FnOnce(usize) -> String + Send>> =
        ReaderTaskEither::asks(|database: Database| {
            Box::new(move |rows| format!("{}:{rows}", database.url)) as Box<dyn FnOnce(usize) -> String + Send>
        });
    let argument: ReaderTaskEither<Limits, i64, usize> =
        ReaderTaskEither::asks(|limits: Limits| limits.max_rows);

    let combined: ReaderTaskEither<Application, Widened, String> = function.ap_w(argument);
    assert_eq!(
        combined.run(application()).await,
        Either::Right("postgres://db:3".to_string())
    );
}

// =============================================================================
// Environment widening
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_widen_environment_reads_provided_part() {
    let url: ReaderTaskEither<Database, String, String> =
        ReaderTaskEither::asks(|database: Database| database.url);
    let widened: ReaderTaskEither<Application, String, String> = url.widen_environment();
    assert_eq!(
        widened.run(application()).await,
        Either::Right("postgres://db".to_string())
    );
}

#[rstest]
#[tokio::test]
async fn test_flat_map_reader_task_either_k_uses_narrow_effect() {
    let effect: ReaderTaskEither<Application, Widened, usize> =
        ReaderTaskEither::<Application, Widened, usize>::right(5).flat_map_reader_task_either_k(
            |requested: usize| {
                ReaderTaskEither::<Limits, i64, usize>::asks(move |limits: Limits| {
                    requested.min(limits.max_rows)
                })
            },
        );
    assert_eq!(effect.run(application()).await, Either::Right(3));
}

// =============================================================================
// Constructors
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_right_and_left_constructors_of_narrower_effects() {
    type Effect = ReaderTaskEither<i32, String, i32>;

    assert_eq!(Effect::right_task(Task::of(1)).run(0).await, Either::Right(1));
    assert_eq!(
        Effect::left_task(Task::of("task".to_string())).run(0).await,
        Either::Left("task".to_string())
    );
    assert_eq!(
        Effect::right_reader(Reader::asks(|n: i32| n + 1)).run(1).await,
        Either::Right(2)
    );
    assert_eq!(
        Effect::left_reader(Reader::asks(|n: i32| n.to_string())).run(9).await,
        Either::Left("9".to_string())
    );
    assert_eq!(Effect::right_io(IO::of(3)).run(0).await, Either::Right(3));
    assert_eq!(
        Effect::left_io(IO::of("io".to_string())).run(0).await,
        Either::Left("io".to_string())
    );
    assert_eq!(
        Effect::right_reader_task(ReaderTask::asks(|n: i32| n * 3)).run(2).await,
        Either::Right(6)
    );
    assert_eq!(
        Effect::left_reader_task(ReaderTask::of("rt".to_string())).run(0).await,
        Either::Left("rt".to_string())
    );
    assert_eq!(Effect::ask().run(11).await, Either::Right(11));
}

#[rstest]
#[tokio::test]
async fn test_io_constructors_run_per_execution() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = Arc::clone(&counter);
    let effect: ReaderTaskEither<(), String, usize> = ReaderTaskEither::right_io(IO::new(move || {
        counter_clone.fetch_add(1, Ordering::SeqCst)
    }));

    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(effect.run(()).await, Either::Right(0));
    assert_eq!(effect.run(()).await, Either::Right(1));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[rstest]
#[tokio::test]
async fn test_from_either_k() {
    let parse = ReaderTaskEither::<(), String, i32>::from_either_k(|text: &str| {
        Either::from(text.parse::<i32>().map_err(|error| error.to_string()))
    });
    assert_eq!(parse("12").run(()).await, Either::Right(12));
    assert!(parse("x").run(()).await.is_left());
}

#[rstest]
#[case(Widened::Letters(Letters::A2), Either::Right(Letters::A2))]
#[case(Widened::Number(3), Either::Left("not a letter: 3".to_string()))]
#[tokio::test]
async fn test_from_refinement_narrows_the_value(
    #[case] value: Widened,
    #[case] expected: Either<String, Letters>,
) {
    let refined = ReaderTaskEither::<(), String, Letters>::from_refinement(
        value,
        |value| match value {
            Widened::Letters(letters) => Ok(letters),
            other => Err(other),
        },
        |rejected| match rejected {
            Widened::Number(number) => format!("not a letter: {number}"),
            Widened::Letters(letters) => format!("unexpected {letters:?}"),
        },
    );
    assert_eq!(refined.run(()).await, expected);
}

// =============================================================================
// Transformation and recovery
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_bimap_transforms_both_sides() {
    let success = ReaderTaskEither::<(), i32, i32>::right(2).bimap(|e| e.to_string(), |a| a * 10);
    let failure = ReaderTaskEither::<(), i32, i32>::left(404).bimap(|e| e.to_string(), |a| a * 10);
    assert_eq!(success.run(()).await, Either::Right(20));
    assert_eq!(failure.run(()).await, Either::Left("404".to_string()));
}

#[rstest]
#[tokio::test]
async fn test_get_or_else_returns_reader_task() {
    let fallback: ReaderTask<i32, i32> =
        ReaderTaskEither::<i32, String, i32>::left("gone".to_string()).get_or_else(|error| error.len() as i32);
    assert_eq!(fallback.run(0).await, 4);
}

#[rstest]
#[tokio::test]
async fn test_filter_or_else_widens() {
    let effect: ReaderTaskEither<(), Widened, i64> =
        ReaderTaskEither::<(), Letters, i64>::right(-1).filter_or_else(|n| *n >= 0, Widened::Number);
    assert_eq!(effect.run(()).await, Either::Left(Widened::Number(-1)));
}

#[rstest]
#[tokio::test]
async fn test_k_variants_chain_narrow_effects() {
    let effect = ReaderTaskEither::<i32, String, i32>::right(1)
        .flat_map_task_k(|n| Task::of(n + 1))
        .flat_map_io_k(|n| IO::of(n * 10))
        .flat_map_reader_k(|n| Reader::asks(move |offset: i32| n + offset))
        .flat_map_reader_task_k(|n| ReaderTask::asks(move |offset: i32| n - offset / 2))
        .flat_map_either_k(|n| {
            if n > 0 {
                Either::Right(n)
            } else {
                Either::Left("not positive".to_string())
            }
        });

    assert_eq!(effect.run(4).await, Either::Right(22));
}
