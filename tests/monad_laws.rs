//! Property-based tests for Monad laws.
//!
//! This module verifies that the synchronous dictionaries satisfy:
//! - Left Identity: `flat_map(of(a), f) == f(a)`
//! - Right Identity: `flat_map(m, of) == m`
//! - Associativity: `flat_map(flat_map(m, f), g) == flat_map(m, |x| flat_map(f(x), g))`
//!
//! It also checks that the derived `ap_seq` agrees with `ap` for Either.

use kindred::control::{Either, EitherInstance};
use kindred::effect::{IO, IOInstance, Reader, ReaderInstance};
use kindred::typeclass::{Apply, Flattenable, Pointed, monad};
use proptest::prelude::*;

type Instance = EitherInstance<String>;

fn either_strategy() -> impl Strategy<Value = Either<String, i32>> {
    prop_oneof![
        any::<i32>().prop_map(Either::Right),
        "[a-z]{1,6}".prop_map(Either::Left),
    ]
}

fn halve(n: i32) -> Either<String, i32> {
    if n % 2 == 0 {
        Either::Right(n / 2)
    } else {
        Either::Left(format!("{n} is odd"))
    }
}

fn shrink(n: i32) -> Either<String, i32> {
    if n.unsigned_abs() > 1000 {
        Either::Right(n % 1000)
    } else {
        Either::Left("too small".to_string())
    }
}

// =============================================================================
// Either<E, A>
// =============================================================================

proptest! {
    /// Left Identity Law for Either
    #[test]
    fn prop_either_left_identity(value: i32) {
        prop_assert_eq!(Instance::flat_map(Instance::of(value), halve), halve(value));
    }

    /// Right Identity Law for Either
    #[test]
    fn prop_either_right_identity(value in either_strategy()) {
        prop_assert_eq!(Instance::flat_map(value.clone(), Instance::of), value);
    }

    /// Associativity Law for Either
    #[test]
    fn prop_either_associativity(value in either_strategy()) {
        let left = Instance::flat_map(Instance::flat_map(value.clone(), halve), shrink);
        let right = Instance::flat_map(value, |x| Instance::flat_map(halve(x), shrink));
        prop_assert_eq!(left, right);
    }

    /// `ap_seq` and `ap` agree for Either
    #[test]
    fn prop_either_ap_seq_matches_ap(function in either_strategy(), value in either_strategy()) {
        let adders = Instance::flat_map(function, |n: i32| Either::Right(move |x: i32| x.wrapping_sub(n)));
        let sequential = monad::ap_seq(Instance::new(), adders.clone(), value.clone());
        let applied = Instance::ap(adders, value);
        prop_assert_eq!(sequential, applied);
    }
}

// =============================================================================
// Reader<R, A>
// =============================================================================

proptest! {
    /// Left Identity Law for Reader
    #[test]
    fn prop_reader_left_identity(value: i32, environment: i32) {
        let function = |n: i32| Reader::asks(move |r: i32| n.wrapping_mul(r));
        let left = ReaderInstance::<i32>::flat_map(ReaderInstance::<i32>::of(value), function);
        prop_assert_eq!(left.run(environment), function(value).run(environment));
    }

    /// Right Identity Law for Reader
    #[test]
    fn prop_reader_right_identity(environment: i32) {
        let reader = Reader::asks(|r: i32| r.wrapping_add(9));
        let left = ReaderInstance::<i32>::flat_map(reader.clone(), ReaderInstance::<i32>::of);
        prop_assert_eq!(left.run(environment), reader.run(environment));
    }

    /// Associativity Law for Reader
    #[test]
    fn prop_reader_associativity(environment: i32) {
        let function1 = |n: i32| Reader::asks(move |r: i32| n.wrapping_add(r));
        let function2 = |n: i32| Reader::asks(move |r: i32| n.wrapping_mul(r));

        let left = ReaderInstance::<i32>::flat_map(ReaderInstance::<i32>::flat_map(Reader::ask(), function1), function2);
        let right = ReaderInstance::<i32>::flat_map(Reader::ask(), move |x| {
            ReaderInstance::<i32>::flat_map(function1(x), function2)
        });

        prop_assert_eq!(left.run(environment), right.run(environment));
    }
}

// =============================================================================
// IO<A>
// =============================================================================

proptest! {
    /// Left Identity Law for IO
    #[test]
    fn prop_io_left_identity(value: i32) {
        let function = |n: i32| IO::of(n.wrapping_mul(2));
        let left = IOInstance::flat_map(IOInstance::of(value), function);
        prop_assert_eq!(left.run_unsafe(), function(value).run_unsafe());
    }

    /// Right Identity Law for IO
    #[test]
    fn prop_io_right_identity(value: i32) {
        prop_assert_eq!(IOInstance::flat_map(IO::of(value), IOInstance::of).run_unsafe(), value);
    }

    /// Associativity Law for IO
    #[test]
    fn prop_io_associativity(value: i32) {
        let function1 = |n: i32| IO::of(n.wrapping_add(1));
        let function2 = |n: i32| IO::of(n.wrapping_mul(2));

        let left = IOInstance::flat_map(IOInstance::flat_map(IO::of(value), function1), function2);
        let right = IOInstance::flat_map(IO::of(value), move |x| IOInstance::flat_map(function1(x), function2));

        prop_assert_eq!(left.run_unsafe(), right.run_unsafe());
    }
}
