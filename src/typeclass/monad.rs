//! Flattenable and Monad type classes - dependent sequential composition.
//!
//! [`Flattenable::flat_map`] runs an effect and feeds its value to a function
//! choosing the next effect. The continuation is unknown until the first value
//! exists, so `flat_map` is always sequential, and a failure of the first
//! effect means the continuation is never invoked.
//!
//! # Laws
//!
//! ## Left Identity
//!
//! ```text
//! F::flat_map(F::of(a), f) == f(a)
//! ```
//!
//! ## Right Identity
//!
//! ```text
//! F::flat_map(m, F::of) == m
//! ```
//!
//! ## Associativity
//!
//! ```text
//! F::flat_map(F::flat_map(m, f), g) == F::flat_map(m, |x| F::flat_map(f(x), g))
//! ```

use super::applicative::Pointed;
use super::functor::Functor;
use super::kind::Value;
use crate::record::{self, Append, Label, Lacks};

/// A type class for effect families supporting dependent composition.
pub trait Flattenable: Functor {
    /// Runs `ma`, then the effect `function` builds from its value.
    ///
    /// # Arguments
    ///
    /// * `ma` - The first effect
    /// * `function` - The continuation, invoked once per successful run of `ma`
    fn flat_map<A, B, F>(ma: Self::Kind<A>, function: F) -> Self::Kind<B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> Self::Kind<B> + Send + Sync + 'static;
}

/// `Pointed` together with `Flattenable`.
pub trait Monad: Pointed + Flattenable {}

impl<F: Pointed + Flattenable> Monad for F {}

/// Collapses one level of nesting.
pub fn flatten<F, A>(instance: F, mma: F::Kind<F::Kind<A>>) -> F::Kind<A>
where
    F: Flattenable,
    A: Value,
    F::Kind<A>: Value,
{
    let _ = instance;
    F::flat_map(mma, |ma| ma)
}

/// Runs the effect `function` builds from the value, keeping the original value.
pub fn tap<F, A, B, G>(instance: F, ma: F::Kind<A>, function: G) -> F::Kind<A>
where
    F: Flattenable,
    A: Clone + Send + Sync + 'static,
    B: Value,
    G: Fn(&A) -> F::Kind<B> + Send + Sync + 'static,
{
    let _ = instance;
    F::flat_map(ma, move |value: A| {
        let effect = function(&value);
        F::map(effect, move |_| value.clone())
    })
}

/// `ap` derived from `flat_map`: always sequential, whatever the dictionary.
pub fn ap_seq<F, A, B, G>(instance: F, fab: F::Kind<G>, fa: F::Kind<A>) -> F::Kind<B>
where
    F: Flattenable,
    A: Value,
    B: Value,
    G: Fn(A) -> B + Send + Sync + 'static,
    F::Kind<A>: Clone + Send + Sync + 'static,
{
    let _ = instance;
    F::flat_map(fab, move |function: G| F::map(fa.clone(), function))
}

/// Runs both effects in order, keeping the first value.
pub fn zip_left<F, A, B>(instance: F, first: F::Kind<A>, second: F::Kind<B>) -> F::Kind<A>
where
    F: Flattenable,
    A: Clone + Send + Sync + 'static,
    B: Value,
    F::Kind<B>: Clone + Send + Sync + 'static,
{
    tap(instance, first, move |_| second.clone())
}

/// Runs both effects in order, keeping the second value.
pub fn zip_right<F, A, B>(instance: F, first: F::Kind<A>, second: F::Kind<B>) -> F::Kind<B>
where
    F: Flattenable,
    A: Value,
    B: Value,
    F::Kind<B>: Clone + Send + Sync + 'static,
{
    let _ = instance;
    F::flat_map(first, move |_| second.clone())
}

/// Adds a field computed by an effect that may read the record built so far.
///
/// Sequential: `function` sees every previously bound field. Binding a label
/// that is already present fails to compile.
///
/// # Examples
///
/// ```rust
/// use kindred::control::{Either, EitherInstance};
/// use kindred::typeclass::{applicative, monad};
///
/// kindred::label! {
///     Width = "width";
///     Area = "area";
/// }
///
/// let instance = EitherInstance::<String>::new();
/// let start = applicative::do_(instance);
/// let with_width = monad::bind(instance, start, Width, |_| Either::Right(3));
/// let with_area = monad::bind(instance, with_width, Area, |fields| {
///     Either::Right(fields.get(Width) * 4)
/// });
///
/// assert_eq!(format!("{with_area:?}"), "Right({width: 3, area: 12})");
/// ```
pub fn bind<F, R, L, B, G>(
    instance: F,
    fa: F::Kind<R>,
    label: L,
    function: G,
) -> F::Kind<<R as Append<L, B>>::Output>
where
    F: Flattenable,
    R: Append<L, B> + Lacks<L> + Clone + Send + Sync + 'static,
    <R as Append<L, B>>::Output: Value,
    L: Label,
    B: Value,
    G: Fn(&R) -> F::Kind<B> + Send + Sync + 'static,
{
    let _ = instance;
    F::flat_map(fa, move |accumulated: R| {
        let effect = function(&accumulated);
        F::map(effect, move |value| {
            record::insert(accumulated.clone(), label, value)
        })
    })
}
