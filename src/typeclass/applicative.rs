//! Apply and Pointed type classes - combining independent effects.
//!
//! [`Apply::ap`] runs an effect producing a function and an effect producing
//! its argument and applies one to the other. Unlike `flat_map`, neither
//! operand depends on the other's value, so a family may run them concurrently.
//! Families with asynchronous suspension therefore come with two dictionaries:
//!
//! - **Par** (`TaskPar`, `ReaderTaskEitherPar`, ...): both operands are started
//!   before either is awaited; both are awaited to completion even when one of
//!   them fails.
//! - **Seq** (`TaskSeq`, `ReaderTaskEitherSeq`, ...): the function operand runs
//!   to completion before the argument operand starts; a failure of the first
//!   means the second never starts.
//!
//! Both are lawful Apply instances. When both operands fail, every instance in
//! this crate reports the error of the function operand (left bias).
//!
//! [`Pointed::of`] lifts a plain value; [`Applicative`] is the combination.
//!
//! # Laws
//!
//! ## Associative Composition Law
//!
//! ```text
//! F::ap(F::ap(F::map(fbc, |bc| |ab| |a| bc(ab(a))), fab), fa)
//!     == F::ap(fbc, F::ap(fab, fa))
//! ```
//!
//! ## Identity Law (Applicative)
//!
//! ```text
//! F::ap(F::of(|x| x), fa) == fa
//! ```
//!
//! # Examples
//!
//! ```rust
//! use kindred::control::{Either, EitherInstance};
//! use kindred::typeclass::applicative::lift2;
//!
//! let sum = lift2(
//!     EitherInstance::new(),
//!     |a: i32, b: i32| a + b,
//!     Either::<String, _>::Right(1),
//!     Either::Right(2),
//! );
//! assert_eq!(sum, Either::Right(3));
//! ```

use std::sync::Arc;

use super::functor::Functor;
use super::kind::{TypeLambda, Value};
use super::semigroup::Semigroup;
use crate::record::{self, Append, Label, Lacks, Nil};

/// A type class for effect families that can apply a wrapped function to a
/// wrapped value.
///
/// # Laws
///
/// ## Associative Composition Law
///
/// ```text
/// F::ap(F::ap(F::map(fbc, |bc| |ab| |a| bc(ab(a))), fab), fa)
///     == F::ap(fbc, F::ap(fab, fa))
/// ```
pub trait Apply: Functor {
    /// Applies the function produced by `fab` to the value produced by `fa`.
    ///
    /// The execution strategy (concurrent or sequential) is the dictionary's.
    /// If both operands fail, the failure of `fab` is the result.
    ///
    /// # Arguments
    ///
    /// * `fab` - The effect producing the function
    /// * `fa` - The effect producing the argument
    fn ap<A, B, G>(fab: Self::Kind<G>, fa: Self::Kind<A>) -> Self::Kind<B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B + Value;
}

/// A type class for effect families that can lift a plain value.
pub trait Pointed: TypeLambda {
    /// Lifts `value`; the result requires nothing, never fails and leaves the
    /// state untouched.
    ///
    /// The value is cloned for every run of the effect.
    fn of<A>(value: A) -> Self::Kind<A>
    where
        A: Clone + Send + Sync + 'static;
}

/// `Apply` together with `Pointed`.
pub trait Applicative: Apply + Pointed {}

impl<F: Apply + Pointed> Applicative for F {}

// =============================================================================
// Lifting n-ary functions
// =============================================================================

/// Lifts a binary function over two independent effects.
///
/// # Arguments
///
/// * `instance` - The dictionary choosing the execution strategy
/// * `function` - The function combining both values
/// * `fa` - The first operand
/// * `fb` - The second operand
pub fn lift2<F, A, B, C, G>(instance: F, function: G, fa: F::Kind<A>, fb: F::Kind<B>) -> F::Kind<C>
where
    F: Apply,
    A: Value,
    B: Value,
    C: Value,
    G: Fn(A, B) -> C + Send + Sync + 'static,
{
    let _ = instance;
    let function = Arc::new(function);
    F::ap(
        F::map(fa, move |a| {
            let function = Arc::clone(&function);
            move |b| function(a, b)
        }),
        fb,
    )
}

/// Lifts a ternary function over three independent effects.
pub fn lift3<F, A, B, C, D, G>(
    instance: F,
    function: G,
    fa: F::Kind<A>,
    fb: F::Kind<B>,
    fc: F::Kind<C>,
) -> F::Kind<D>
where
    F: Apply,
    A: Value,
    B: Value,
    C: Value,
    D: Value,
    G: Fn(A, B, C) -> D + Send + Sync + 'static,
{
    let _ = instance;
    let function = Arc::new(function);
    let partially_applied = F::map(fa, move |a| {
        let function = Arc::clone(&function);
        move |b| move |c| function(a, b, c)
    });
    F::ap(F::ap(partially_applied, fb), fc)
}

/// Combines two effects, keeping the first value.
///
/// Both effects run with the dictionary's strategy; with a Par dictionary the
/// second is awaited even when the first fails.
pub fn zip_left_par<F, A, B>(instance: F, first: F::Kind<A>, second: F::Kind<B>) -> F::Kind<A>
where
    F: Apply,
    A: Value,
    B: Value,
{
    lift2(instance, |a, _| a, first, second)
}

/// Combines two effects, keeping the second value.
pub fn zip_right_par<F, A, B>(instance: F, first: F::Kind<A>, second: F::Kind<B>) -> F::Kind<B>
where
    F: Apply,
    A: Value,
    B: Value,
{
    lift2(instance, |_, b| b, first, second)
}

/// Lifts a [`Semigroup`] on values to a combining function on effects.
///
/// # Examples
///
/// ```rust
/// use kindred::control::{Either, EitherInstance};
/// use kindred::typeclass::applicative::apply_semigroup;
///
/// let combine = apply_semigroup(EitherInstance::<()>::new());
/// assert_eq!(
///     combine(Either::Right("a".to_string()), Either::Right("b".to_string())),
///     Either::Right("ab".to_string()),
/// );
/// ```
pub fn apply_semigroup<F, A>(instance: F) -> impl Fn(F::Kind<A>, F::Kind<A>) -> F::Kind<A>
where
    F: Apply,
    A: Semigroup + Value,
{
    move |first, second| lift2(instance, Semigroup::combine, first, second)
}

// =============================================================================
// Do-notation and tuples
// =============================================================================

/// Starts do-notation with the empty record.
pub fn do_<F: Pointed>(instance: F) -> F::Kind<Nil> {
    let _ = instance;
    F::of(Nil)
}

/// Adds a field from an effect that does not depend on the record.
///
/// `fb` is combined with `ap`, so with a Par dictionary it runs concurrently
/// with the effect building the record.
pub fn ap_s<F, R, L, B>(
    instance: F,
    fa: F::Kind<R>,
    label: L,
    fb: F::Kind<B>,
) -> F::Kind<<R as Append<L, B>>::Output>
where
    F: Apply,
    R: Append<L, B> + Lacks<L> + Value,
    <R as Append<L, B>>::Output: Value,
    L: Label,
    B: Value,
{
    let _ = instance;
    F::ap(
        F::map(fa, move |accumulated: R| {
            move |value: B| record::insert(accumulated, label, value)
        }),
        fb,
    )
}

/// Tuples that can grow by one element at the end.
pub trait TupleAppend<T> {
    /// The tuple with `T` appended.
    type Output;

    /// Appends `value` as the last element.
    fn append_element(self, value: T) -> Self::Output;
}

macro_rules! tuple_append {
    ($(($($element:ident),*)),+ $(,)?) => {
        $(
            #[allow(non_snake_case)]
            impl<$($element,)* T> TupleAppend<T> for ($($element,)*) {
                type Output = ($($element,)* T,);

                fn append_element(self, value: T) -> Self::Output {
                    let ($($element,)*) = self;
                    ($($element,)* value,)
                }
            }
        )+
    };
}

tuple_append!((), (A), (A, B), (A, B, C), (A, B, C, D));

/// Appends the value of `fb` to the tuple produced by `fa`.
///
/// Start from [`ap_t_unit`] or a one-element tuple built with
/// [`tupled`](super::functor::tupled).
pub fn ap_t<F, T, B>(instance: F, fa: F::Kind<T>, fb: F::Kind<B>) -> F::Kind<T::Output>
where
    F: Apply,
    T: TupleAppend<B> + Value,
    T::Output: Value,
    B: Value,
{
    let _ = instance;
    F::ap(
        F::map(fa, |tuple: T| move |value: B| tuple.append_element(value)),
        fb,
    )
}

/// The empty tuple lifted with `of`, the starting point of [`ap_t`] chains.
pub fn ap_t_unit<F: Pointed>(instance: F) -> F::Kind<()> {
    let _ = instance;
    F::of(())
}
