#![cfg(feature = "async")]
//! Integration tests for the derived applicative combinators.
//!
//! Tests cover:
//! - `lift2`, `lift3`, `zip_left_par`, `zip_right_par`
//! - `apply_semigroup`
//! - Tuple building with `ap_t`
//! - The first-error rule for Par and Seq dictionaries

use kindred::control::{Either, EitherInstance, NonEmptyVec};
use kindred::effect::{
    IO, IOInstance, Reader, ReaderInstance, ReaderTaskEither, ReaderTaskEitherPar,
    ReaderTaskEitherSeq, Task, TaskPar,
};
use kindred::typeclass::applicative::{
    ap_t, ap_t_unit, apply_semigroup, lift2, lift3, zip_left_par, zip_right_par,
};
use kindred::typeclass::functor;
use parking_lot::Mutex;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

// =============================================================================
// lift2 / lift3
// =============================================================================

#[rstest]
fn test_lift2_over_reader_shares_environment() {
    let sum = lift2(
        ReaderInstance::new(),
        |a: i32, b: i32| a + b,
        Reader::asks(|n: i32| n * 2),
        Reader::asks(|n: i32| n + 1),
    );
    assert_eq!(sum.run(10), 31);
}

#[rstest]
fn test_lift3_over_io_runs_left_to_right() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let step = |name: &'static str| {
        let log = Arc::clone(&log);
        IO::new(move || {
            log.lock().push(name);
            name.len()
        })
    };

    let total = lift3(
        IOInstance,
        |a: usize, b: usize, c: usize| a + b + c,
        step("one"),
        step("three"),
        step("seven"),
    );

    assert_eq!(total.run_unsafe(), 13);
    assert_eq!(*log.lock(), vec!["one", "three", "seven"]);
}

#[rstest]
#[tokio::test]
async fn test_lift3_over_reader_task_either() {
    let combined = lift3(
        ReaderTaskEitherPar::<i32, String>::new(),
        |a: i32, b: String, c: bool| format!("{a}{b}{c}"),
        ReaderTaskEither::asks(|n: i32| n),
        ReaderTaskEither::right("-".to_string()),
        ReaderTaskEither::asks(|n: i32| n > 0),
    );
    assert_eq!(combined.run(3).await, Either::Right("3-true".to_string()));
}

#[rstest]
#[tokio::test]
async fn test_zip_left_and_right_par() {
    let left = zip_left_par(TaskPar, Task::of(1), Task::of("unused"));
    let right = zip_right_par(TaskPar, Task::of(1), Task::of("kept"));
    assert_eq!(left.await, 1);
    assert_eq!(right.await, "kept");
}

#[rstest]
#[tokio::test]
async fn test_zip_left_par_still_fails_on_second() {
    let zipped = zip_left_par(
        ReaderTaskEitherPar::<(), String>::new(),
        ReaderTaskEither::right(1),
        ReaderTaskEither::<(), String, ()>::left("second".to_string()),
    );
    assert_eq!(zipped.run(()).await, Either::Left("second".to_string()));
}

// =============================================================================
// Semigroup and tuples
// =============================================================================

#[rstest]
fn test_apply_semigroup_with_either() {
    let combine = apply_semigroup(EitherInstance::<&str>::new());
    assert_eq!(
        combine(Either::Right(vec![1]), Either::Right(vec![2, 3])),
        Either::Right(vec![1, 2, 3])
    );
    assert_eq!(
        combine(Either::Right(vec![1]), Either::Left("missing")),
        Either::Left("missing")
    );
}

#[rstest]
#[tokio::test]
async fn test_apply_semigroup_with_task() {
    let combine = apply_semigroup(TaskPar);
    let merged = combine(
        Task::of(NonEmptyVec::singleton('a')),
        Task::of(NonEmptyVec::new('b', vec!['c'])),
    );
    assert_eq!(merged.await, NonEmptyVec::new('a', vec!['b', 'c']));
}

#[rstest]
fn test_ap_t_builds_tuples() {
    let instance = EitherInstance::<String>::new();
    let start = ap_t_unit(instance);
    let one = ap_t(instance, start, Either::Right(1));
    let two = ap_t(instance, one, Either::Right('x'));
    let three = ap_t(instance, two, Either::Right("three"));
    assert_eq!(three, Either::Right((1, 'x', "three")));
}

#[rstest]
fn test_tupled_wraps_value() {
    assert_eq!(
        functor::tupled(EitherInstance::<()>::new(), Either::Right(5)),
        Either::Right((5,))
    );
}

// =============================================================================
// First-error rule
// =============================================================================

fn failing_after(
    log: &Arc<Mutex<Vec<&'static str>>>,
    name: &'static str,
    wait: u64,
) -> ReaderTaskEither<(), &'static str, i32> {
    let log = Arc::clone(log);
    ReaderTaskEither::new(move |()| {
        let log = Arc::clone(&log);
        async move {
            tokio::time::sleep(Duration::from_millis(wait)).await;
            log.lock().push(name);
            Either::Left(name)
        }
    })
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_par_reports_first_operand_error_even_when_it_finishes_last() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let combined = lift2(
        ReaderTaskEitherPar::new(),
        |a: i32, b: i32| a + b,
        failing_after(&log, "first", 40),
        failing_after(&log, "second", 10),
    );

    assert_eq!(combined.run(()).await, Either::Left("first"));
    assert_eq!(*log.lock(), vec!["second", "first"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_seq_reports_first_operand_error_and_skips_second() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let combined = lift2(
        ReaderTaskEitherSeq::new(),
        |a: i32, b: i32| a + b,
        failing_after(&log, "first", 40),
        failing_after(&log, "second", 10),
    );

    assert_eq!(combined.run(()).await, Either::Left("first"));
    assert_eq!(*log.lock(), vec!["first"]);
}
