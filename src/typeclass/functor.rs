//! Functor type class - mapping over the value slot of an effect.
//!
//! `map` transforms the value an effect produces and leaves every other channel
//! (environment, error, state) untouched.
//!
//! # Laws
//!
//! ## Identity Law
//!
//! ```text
//! F::map(fa, |x| x) == fa
//! ```
//!
//! ## Composition Law
//!
//! ```text
//! F::map(F::map(fa, f), g) == F::map(fa, |x| g(f(x)))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use kindred::control::{Either, EitherInstance};
//! use kindred::typeclass::{Functor, functor};
//!
//! let value: Either<String, i32> = Either::Right(5);
//! let shown = EitherInstance::map(value, |n| n.to_string());
//! assert_eq!(shown, Either::Right("5".to_string()));
//!
//! let replaced = functor::as_(EitherInstance::new(), Either::<String, i32>::Right(5), 'x');
//! assert_eq!(replaced, Either::Right('x'));
//! ```

use super::kind::{TypeLambda, Value};
use crate::record::{self, Append, Cons, Label, Lacks, Nil};

/// A type class for effect families whose value can be transformed.
///
/// # Laws
///
/// ## Identity Law
///
/// ```text
/// F::map(fa, |x| x) == fa
/// ```
///
/// ## Composition Law
///
/// ```text
/// F::map(F::map(fa, f), g) == F::map(fa, |x| g(f(x)))
/// ```
pub trait Functor: TypeLambda {
    /// Applies `function` to the value produced by `fa`.
    ///
    /// `function` is shared by every run of the resulting effect, hence `Fn`.
    ///
    /// # Arguments
    ///
    /// * `fa` - The effect to transform
    /// * `function` - The transformation of the success value
    fn map<A, B, F>(fa: Self::Kind<A>, function: F) -> Self::Kind<B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static;
}

// =============================================================================
// Derived Combinators
// =============================================================================

/// Applies the function produced by `fab` to a fixed argument.
///
/// # Examples
///
/// ```rust
/// use kindred::control::{Either, EitherInstance};
/// use kindred::typeclass::functor::flap;
///
/// let function: Either<(), fn(i32) -> i32> = Either::Right(|n| n + 1);
/// assert_eq!(flap(EitherInstance::new(), function, 41), Either::Right(42));
/// ```
pub fn flap<F, A, B, G>(instance: F, fab: F::Kind<G>, argument: A) -> F::Kind<B>
where
    F: Functor,
    A: Clone + Send + Sync + 'static,
    B: Value,
    G: Fn(A) -> B + Value,
{
    let _ = instance;
    F::map(fab, move |function: G| function(argument.clone()))
}

/// Replaces the produced value with `value`.
pub fn as_<F, A, B>(instance: F, fa: F::Kind<A>, value: B) -> F::Kind<B>
where
    F: Functor,
    A: Value,
    B: Clone + Send + Sync + 'static,
{
    let _ = instance;
    F::map(fa, move |_| value.clone())
}

/// Discards the produced value.
pub fn void<F, A>(instance: F, fa: F::Kind<A>) -> F::Kind<()>
where
    F: Functor,
    A: Value,
{
    let _ = instance;
    F::map(fa, |_| ())
}

/// Wraps the produced value in a one-element tuple.
pub fn tupled<F, A>(instance: F, fa: F::Kind<A>) -> F::Kind<(A,)>
where
    F: Functor,
    A: Value,
{
    let _ = instance;
    F::map(fa, |value| (value,))
}

/// Starts a do-notation record with the produced value as its first field.
///
/// # Examples
///
/// ```rust
/// use kindred::control::{Either, EitherInstance};
/// use kindred::typeclass::functor::bind_to;
///
/// kindred::label!(Answer = "answer");
///
/// let record = bind_to(EitherInstance::new(), Either::<(), i32>::Right(42), Answer);
/// assert_eq!(format!("{record:?}"), "Right({answer: 42})");
/// ```
pub fn bind_to<F, A, L>(instance: F, fa: F::Kind<A>, label: L) -> F::Kind<Cons<L, A, Nil>>
where
    F: Functor,
    A: Value,
    L: Label,
{
    let _ = instance;
    F::map(fa, move |value| record::insert(Nil, label, value))
}

/// Adds a field computed purely from the record built so far.
pub fn let_<F, R, L, B, G>(
    instance: F,
    fa: F::Kind<R>,
    label: L,
    function: G,
) -> F::Kind<<R as Append<L, B>>::Output>
where
    F: Functor,
    R: Append<L, B> + Lacks<L> + Value,
    <R as Append<L, B>>::Output: Value,
    L: Label,
    B: Value,
    G: Fn(&R) -> B + Send + Sync + 'static,
{
    let _ = instance;
    F::map(fa, move |accumulated: R| {
        let value = function(&accumulated);
        record::insert(accumulated, label, value)
    })
}
