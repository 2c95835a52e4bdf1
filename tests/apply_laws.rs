//! Property-based tests for Apply and Pointed laws.
//!
//! - **Identity**: `ap(of(|x| x), v) == v`
//! - **Homomorphism**: `ap(of(f), of(x)) == of(f(x))`
//! - **Interchange**: `ap(u, of(y)) == ap(of(|f| f(y)), u)`
//! - **Composition**: `ap(ap(map(u, compose), v), w) == ap(u, ap(v, w))`
//!
//! Composition also pins down which failure `ap` reports: both sides must
//! agree on it, so the first failing operand wins.

use kindred::control::{Either, EitherInstance};
use kindred::effect::{IO, IOInstance, Reader, ReaderInstance};
use kindred::typeclass::{Apply, Functor, Pointed};
use proptest::prelude::*;

fn either_strategy() -> impl Strategy<Value = Either<String, i32>> {
    prop_oneof![
        3 => any::<i32>().prop_map(Either::Right),
        1 => "[a-z]{1,6}".prop_map(Either::Left),
    ]
}

type Instance = EitherInstance<String>;
type Adder = Box<dyn FnOnce(i32) -> i32 + Send>;

// =============================================================================
// Either<E, A>
// =============================================================================

proptest! {
    /// Identity Law for Either
    #[test]
    fn prop_either_identity_law(value in either_strategy()) {
        let result = Instance::ap(Instance::of(|x: i32| x), value.clone());
        prop_assert_eq!(result, value);
    }

    /// Homomorphism Law for Either
    #[test]
    fn prop_either_homomorphism_law(value: i32) {
        let function = |n: i32| n.wrapping_mul(3);
        let left = Instance::ap(Instance::of(function), Instance::of(value));
        let right: Either<String, i32> = Instance::of(function(value));
        prop_assert_eq!(left, right);
    }

    /// Interchange Law for Either
    #[test]
    fn prop_either_interchange_law(offset in either_strategy(), argument: i32) {
        let adders = |offset: Either<String, i32>| {
            Instance::map(offset, |n: i32| Box::new(move |x: i32| x.wrapping_add(n)) as Adder)
        };
        let left = Instance::ap(adders(offset.clone()), Instance::of(argument));
        let right = Instance::ap(Instance::of(move |function: Adder| function(argument)), adders(offset));
        prop_assert_eq!(left, right);
    }

    /// Composition Law for Either, including which failure is reported
    #[test]
    fn prop_either_composition_law(
        first in either_strategy(),
        second in either_strategy(),
        value in either_strategy(),
    ) {
        let u = Instance::map(first.clone(), |n: i32| move |x: i32| x.wrapping_mul(n));
        let v = Instance::map(second.clone(), |n: i32| move |x: i32| x.wrapping_add(n));

        let composed = Instance::map(u.clone(), |f| move |g: Adder| move |x: i32| f(g(x)));
        let boxed_v = Instance::map(v.clone(), |g| Box::new(g) as Adder);
        let left = Instance::ap(Instance::ap(composed, boxed_v), value.clone());
        let right = Instance::ap(u, Instance::ap(v, value.clone()));

        prop_assert_eq!(left.clone(), right);
        let first_error = [first, second, value].into_iter().find_map(|operand| match operand {
            Either::Left(error) => Some(error),
            Either::Right(_) => None,
        });
        if let Some(error) = first_error {
            prop_assert_eq!(left, Either::Left(error));
        }
    }
}

// =============================================================================
// Reader<R, A>
// =============================================================================

proptest! {
    /// Identity Law for Reader
    #[test]
    fn prop_reader_identity_law(environment: i32) {
        let reader = Reader::asks(|n: i32| n.wrapping_neg());
        let result = ReaderInstance::<i32>::ap(ReaderInstance::<i32>::of(|x: i32| x), reader.clone());
        prop_assert_eq!(result.run(environment), reader.run(environment));
    }

    /// Composition Law for Reader
    #[test]
    fn prop_reader_composition_law(environment: i32) {
        let u = Reader::asks(|n: i32| move |x: i32| x.wrapping_mul(n));
        let v = Reader::asks(|n: i32| move |x: i32| x.wrapping_sub(n));
        let w = Reader::asks(|n: i32| n.wrapping_add(5));

        let composed = ReaderInstance::<i32>::map(u.clone(), |f| move |g: Adder| move |x: i32| f(g(x)));
        let boxed_v = ReaderInstance::<i32>::map(v.clone(), |g| Box::new(g) as Adder);
        let left = ReaderInstance::<i32>::ap(ReaderInstance::<i32>::ap(composed, boxed_v), w.clone());
        let right = ReaderInstance::<i32>::ap(u, ReaderInstance::<i32>::ap(v, w));

        prop_assert_eq!(left.run(environment), right.run(environment));
    }
}

// =============================================================================
// IO<A>
// =============================================================================

proptest! {
    /// Homomorphism Law for IO
    #[test]
    fn prop_io_homomorphism_law(value: i64) {
        let function = |n: i64| n.wrapping_sub(11);
        let left = IOInstance::ap(IOInstance::of(function), IOInstance::of(value));
        prop_assert_eq!(left.run_unsafe(), function(value));
    }

    /// Identity Law for IO
    #[test]
    fn prop_io_identity_law(value in "[a-z]{0,12}") {
        let result = IOInstance::ap(IOInstance::of(|x: String| x), IO::of(value.clone()));
        prop_assert_eq!(result.run_unsafe(), value);
    }
}
