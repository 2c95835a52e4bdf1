#![cfg(feature = "async")]
//! Integration tests for do-notation.
//!
//! Records are built field by field with `bind`, `ap_s` and `let_`. Steps
//! whose environments and errors are narrower than the chain join it through
//! `widen`, and every later step can read the fields bound before it.

use kindred::control::Either;
use kindred::effect::{ReaderTaskEither, Task};
use kindred::record::{Nil, Record};
use kindred::typeclass::Provides;
use rstest::rstest;

kindred::label! {
    A1 = "a1";
    A2 = "a2";
    Total = "total";
}

#[derive(Debug, Clone)]
struct NeedsA {
    a: i32,
}

#[derive(Debug, Clone)]
struct NeedsB {
    b: String,
}

#[derive(Debug, Clone)]
struct Both {
    a: i32,
    b: String,
}

impl Provides<NeedsA> for Both {
    fn provide(&self) -> NeedsA {
        NeedsA { a: self.a }
    }
}

impl Provides<NeedsB> for Both {
    fn provide(&self) -> NeedsB {
        NeedsB { b: self.b.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NegativeA(i32);

#[derive(Debug, Clone, PartialEq, Eq)]
struct EmptyB;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AppError {
    Negative(i32),
    Empty,
}

impl From<NegativeA> for AppError {
    fn from(error: NegativeA) -> Self {
        Self::Negative(error.0)
    }
}

impl From<EmptyB> for AppError {
    fn from(_: EmptyB) -> Self {
        Self::Empty
    }
}

type Program<A> = ReaderTaskEither<Both, AppError, A>;

fn read_a() -> ReaderTaskEither<NeedsA, NegativeA, i32> {
    ReaderTaskEither::asks(|needs: NeedsA| needs.a).flat_map(|a| {
        if a < 0 {
            ReaderTaskEither::left(NegativeA(a))
        } else {
            ReaderTaskEither::right(a)
        }
    })
}

fn repeat_b(times: i32) -> ReaderTaskEither<NeedsB, EmptyB, String> {
    ReaderTaskEither::asks(move |needs: NeedsB| needs.b.repeat(times.max(0) as usize)).flat_map(
        |text: String| {
            if text.is_empty() {
                ReaderTaskEither::left(EmptyB)
            } else {
                ReaderTaskEither::right(text)
            }
        },
    )
}

fn both(a: i32, b: &str) -> Both {
    Both {
        a,
        b: b.to_string(),
    }
}

// =============================================================================
// Widening inside bind
// =============================================================================

fn program() -> Program<String> {
    Program::<Nil>::do_()
        .bind(A1, |_| read_a().widen())
        .bind(A2, |fields| repeat_b(*fields.get(A1)).widen())
        .map(|fields| {
            assert_eq!(<_ as Record>::names_of(&fields), vec!["a1", "a2"]);
            format!("{}:{}", fields.get(A1), fields.get(A2))
        })
}

#[rstest]
#[case(both(2, "ab"), Either::Right("2:abab".to_string()))]
#[case(both(-1, "ab"), Either::Left(AppError::Negative(-1)))]
#[case(both(0, "ab"), Either::Left(AppError::Empty))]
#[case(both(3, ""), Either::Left(AppError::Empty))]
#[tokio::test]
async fn test_bind_widens_each_step(#[case] environment: Both, #[case] expected: Either<AppError, String>) {
    assert_eq!(program().run(environment).await, expected);
}

#[rstest]
#[tokio::test]
async fn test_record_debug_lists_fields_in_binding_order() {
    let record = Program::<Nil>::do_()
        .bind(A1, |_| read_a().widen())
        .ap_s(A2, repeat_b(1).widen())
        .let_(Total, |fields| *fields.get(A1) + fields.get(A2).len() as i32);

    let outcome = record.run(both(4, "xyz")).await;
    assert_eq!(
        format!("{outcome:?}"),
        r#"Right({a1: 4, a2: "xyz", total: 7})"#
    );
}

#[rstest]
#[tokio::test]
async fn test_bind_to_starts_record_from_value() {
    let record = read_a()
        .bind_to(A1)
        .let_(Total, |fields| fields.get(A1) * 10);
    let outcome = record.map(|fields| *fields.get(Total)).run(NeedsA { a: 5 }).await;
    assert_eq!(outcome, Either::Right(50));
}

// =============================================================================
// Other families
// =============================================================================

#[rstest]
fn test_either_do_notation_stops_at_first_left() {
    let record = Either::<String, _>::do_()
        .bind(A1, |_| Either::Right(1))
        .bind(A2, |_| Either::<String, i32>::Left("no a2".to_string()))
        .let_(Total, |fields| fields.get(A1) + fields.get(A2));
    assert_eq!(record.map(|fields| *fields.get(Total)), Either::Left("no a2".to_string()));
}

#[rstest]
#[tokio::test]
async fn test_task_do_notation() {
    let record = Task::do_()
        .bind(A1, |_| Task::of(20))
        .ap_s(A2, Task::of(22))
        .let_(Total, |fields| fields.get(A1) + fields.get(A2));
    assert_eq!(*record.await.get(Total), 42);
}
