//! Traversal of collections with any applicative effect family.
//!
//! These functions are written only against [`Apply`](super::Apply) and
//! [`Pointed`](super::Pointed), so they work for every dictionary: with a Par
//! dictionary the element effects run concurrently, with a Seq dictionary they
//! run one after another in index order and stop at the first failure.
//!
//! The element function is called for every element when the traversal is
//! built, before anything runs. Effect families also offer specialized
//! traversals (`ReaderTaskEither::traverse_vec` and friends) that call it
//! lazily at run time; those are the ones to prefer for long inputs.
//!
//! An empty input yields the lifted empty vector without calling the function.
//!
//! # Examples
//!
//! ```rust
//! use kindred::control::{Either, EitherInstance};
//! use kindred::typeclass::traversable::traverse_vec;
//!
//! let parsed = traverse_vec(EitherInstance::new(), vec!["1", "2"], |text: &str| {
//!     Either::from(text.parse::<i32>().map_err(|error| error.to_string()))
//! });
//! assert_eq!(parsed, Either::Right(vec![1, 2]));
//! ```

use super::applicative::Applicative;
use super::kind::Value;
use super::semigroup::Semigroup;
use crate::control::NonEmptyVec;

/// Traverses a non-empty vector, passing each element's index.
///
/// The effects are combined as a balanced tree of `ap` calls, so running the
/// result nests only logarithmically many futures. The left half is always
/// the function side: element order, the lowest-index failure and the Seq
/// short-circuit are those of a left-to-right fold.
pub fn traverse_non_empty_with_index<F, T, B, G>(
    instance: F,
    items: NonEmptyVec<T>,
    function: G,
) -> F::Kind<NonEmptyVec<B>>
where
    F: Applicative,
    B: Value,
    G: Fn(usize, T) -> F::Kind<B>,
{
    let _ = instance;
    traverse_segment::<F, T, B, G>(0, items.into_vec(), &function)
}

/// Traverses `items`, which must not be empty; the first has index `offset`.
fn traverse_segment<F, T, B, G>(
    offset: usize,
    mut items: Vec<T>,
    function: &G,
) -> F::Kind<NonEmptyVec<B>>
where
    F: Applicative,
    B: Value,
    G: Fn(usize, T) -> F::Kind<B>,
{
    if items.len() == 1 {
        let item = items.remove(0);
        return F::map(function(offset, item), NonEmptyVec::singleton);
    }
    let right_items = items.split_off(items.len() / 2);
    let right_offset = offset + items.len();
    let left = traverse_segment::<F, T, B, G>(offset, items, function);
    let right = traverse_segment::<F, T, B, G>(right_offset, right_items, function);
    let concatenate = F::map(left, |values: NonEmptyVec<B>| {
        move |rest: NonEmptyVec<B>| values.combine(rest)
    });
    F::ap(concatenate, right)
}

/// Traverses a non-empty vector.
pub fn traverse_non_empty<F, T, B, G>(
    instance: F,
    items: NonEmptyVec<T>,
    function: G,
) -> F::Kind<NonEmptyVec<B>>
where
    F: Applicative,
    B: Value,
    G: Fn(T) -> F::Kind<B>,
{
    traverse_non_empty_with_index(instance, items, |_, item| function(item))
}

/// Collects a non-empty vector of effects into an effect of values.
pub fn sequence_non_empty<F, A>(
    instance: F,
    effects: NonEmptyVec<F::Kind<A>>,
) -> F::Kind<NonEmptyVec<A>>
where
    F: Applicative,
    A: Value,
{
    traverse_non_empty_with_index(instance, effects, |_, effect| effect)
}

/// Traverses a vector, passing each element's index.
pub fn traverse_vec_with_index<F, T, B, G>(
    instance: F,
    items: Vec<T>,
    function: G,
) -> F::Kind<Vec<B>>
where
    F: Applicative,
    B: Value,
    G: Fn(usize, T) -> F::Kind<B>,
{
    match NonEmptyVec::from_vec(items) {
        Some(items) => F::map(
            traverse_non_empty_with_index(instance, items, function),
            NonEmptyVec::into_vec,
        ),
        None => F::map(F::of(()), |()| Vec::new()),
    }
}

/// Traverses a vector.
pub fn traverse_vec<F, T, B, G>(instance: F, items: Vec<T>, function: G) -> F::Kind<Vec<B>>
where
    F: Applicative,
    B: Value,
    G: Fn(T) -> F::Kind<B>,
{
    traverse_vec_with_index(instance, items, |_, item| function(item))
}

/// Collects a vector of effects into an effect of values.
pub fn sequence_vec<F, A>(instance: F, effects: Vec<F::Kind<A>>) -> F::Kind<Vec<A>>
where
    F: Applicative,
    A: Value,
{
    traverse_vec_with_index(instance, effects, |_, effect| effect)
}
