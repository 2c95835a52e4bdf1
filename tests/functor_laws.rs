//! Property-based tests for Functor laws.
//!
//! This module verifies that the synchronous Functor dictionaries satisfy the
//! required laws:
//!
//! - **Identity Law**: `map(fa, |x| x) == fa`
//! - **Composition Law**: `map(map(fa, f), g) == map(fa, |x| g(f(x)))`
//!
//! Readers and IOs are compared by running them. The asynchronous families are
//! covered in `async_laws.rs`.

use kindred::control::{Either, EitherInstance, NonEmptyVec};
use kindred::effect::{IO, IOInstance, Reader, ReaderInstance};
use kindred::typeclass::{Functor, functor};
use proptest::prelude::*;

fn either_strategy() -> impl Strategy<Value = Either<String, i32>> {
    prop_oneof![
        any::<i32>().prop_map(Either::Right),
        "[a-z]{0,8}".prop_map(Either::Left),
    ]
}

// =============================================================================
// Either<E, A>
// =============================================================================

proptest! {
    /// Identity Law for Either<String, i32>
    #[test]
    fn prop_either_identity_law(value in either_strategy()) {
        let result = EitherInstance::<String>::map(value.clone(), |x| x);
        prop_assert_eq!(result, value);
    }

    /// Composition Law for Either<String, i32>
    #[test]
    fn prop_either_composition_law(value in either_strategy()) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);

        let left = EitherInstance::<String>::map(EitherInstance::<String>::map(value.clone(), function1), function2);
        let right = EitherInstance::<String>::map(value, move |x| function2(function1(x)));

        prop_assert_eq!(left, right);
    }

    /// `as_` replaces the value but keeps a failure
    #[test]
    fn prop_either_as_keeps_left(value in either_strategy()) {
        let replaced = functor::as_(EitherInstance::new(), value.clone(), 'z');
        prop_assert_eq!(replaced.is_left(), value.is_left());
    }
}

// =============================================================================
// Reader<R, A>
// =============================================================================

proptest! {
    /// Identity Law for Reader<i32, i32>
    #[test]
    fn prop_reader_identity_law(environment: i32, offset: i32) {
        let reader = Reader::asks(move |n: i32| n.wrapping_add(offset));
        let mapped = ReaderInstance::<i32>::map(reader.clone(), |x| x);
        prop_assert_eq!(mapped.run(environment), reader.run(environment));
    }

    /// Composition Law for Reader<i32, i32>
    #[test]
    fn prop_reader_composition_law(environment: i32) {
        let function1 = |n: i32| n.wrapping_sub(3);
        let function2 = |n: i32| n.to_string();

        let left = ReaderInstance::<i32>::map(ReaderInstance::<i32>::map(Reader::ask(), function1), function2);
        let right = ReaderInstance::<i32>::map(Reader::ask(), move |x| function2(function1(x)));

        prop_assert_eq!(left.run(environment), right.run(environment));
    }
}

// =============================================================================
// IO<A>
// =============================================================================

proptest! {
    /// Identity Law for IO<String>
    #[test]
    fn prop_io_identity_law(value in "[a-z]{0,16}") {
        let io = IO::of(value.clone());
        prop_assert_eq!(IOInstance::map(io, |x| x).run_unsafe(), value);
    }

    /// Composition Law for IO<String>
    #[test]
    fn prop_io_composition_law(value in "[a-z]{0,16}") {
        let function1 = |s: String| s.len();
        let function2 = |n: usize| n.wrapping_mul(2);

        let left = IOInstance::map(IOInstance::map(IO::of(value.clone()), function1), function2);
        let right = IOInstance::map(IO::of(value), move |x| function2(function1(x)));

        prop_assert_eq!(left.run_unsafe(), right.run_unsafe());
    }
}

// =============================================================================
// NonEmptyVec<A>
// =============================================================================

proptest! {
    /// Identity Law for NonEmptyVec<i32> mapping
    #[test]
    fn prop_non_empty_identity_law(head: i32, tail in prop::collection::vec(any::<i32>(), 0..8)) {
        let values = NonEmptyVec::new(head, tail);
        prop_assert_eq!(values.clone().map(|x| x), values);
    }

    /// Composition Law for NonEmptyVec<i32> mapping
    #[test]
    fn prop_non_empty_composition_law(head: i32, tail in prop::collection::vec(any::<i32>(), 0..8)) {
        let function1 = |n: i32| n.wrapping_add(7);
        let function2 = |n: i32| i64::from(n) * 3;

        let values = NonEmptyVec::new(head, tail);
        let left = values.clone().map(function1).map(function2);
        let right = values.map(|x| function2(function1(x)));

        prop_assert_eq!(left, right);
    }
}
