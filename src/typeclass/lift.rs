//! Lifting contracts - embedding a narrower effect into a richer family.
//!
//! - [`FromReader`]: the family reads an environment, so a [`Reader`] embeds
//!   into it. The lifted effect never suspends and never fails.
//! - [`FromIO`]: the family can run synchronous side effects ([`IO`]).
//! - [`FromTask`]: the family can suspend asynchronously ([`Task`]).
//!
//! The `_k` helpers lift a function returning the narrower effect, and the
//! `flat_map_*_k` helpers chain such a function after an existing effect.
//!
//! # Examples
//!
//! ```rust
//! use kindred::effect::{Reader, ReaderInstance};
//! use kindred::typeclass::lift;
//!
//! let port = lift::asks(ReaderInstance::<(String, u16)>::new(), |environment| environment.1);
//! assert_eq!(port.run(("localhost".to_string(), 8080)), 8080);
//! ```

#[cfg(feature = "async")]
use std::time::Duration;

use super::kind::{Environment, TypeLambda, Value};
use super::monad::Flattenable;
use crate::effect::{IO, Reader};
#[cfg(feature = "async")]
use crate::effect::Task;

/// Families whose effects can read an environment.
pub trait FromReader: TypeLambda {
    /// The environment slot of this family.
    type Env: Environment;

    /// Embeds a [`Reader`] over this family's environment.
    fn from_reader<A: Value>(fa: Reader<Self::Env, A>) -> Self::Kind<A>;
}

/// Families whose effects can run synchronous side effects.
pub trait FromIO: TypeLambda {
    /// Embeds an [`IO`]; it runs each time the resulting effect runs.
    fn from_io<A: Value>(fa: IO<A>) -> Self::Kind<A>;
}

/// Families whose effects can suspend asynchronously.
#[cfg(feature = "async")]
pub trait FromTask: FromIO {
    /// Embeds a [`Task`]; it runs each time the resulting effect runs.
    fn from_task<A: Value>(fa: Task<A>) -> Self::Kind<A>;
}

// =============================================================================
// FromReader
// =============================================================================

/// The whole environment as the value.
pub fn ask<F: FromReader>(instance: F) -> F::Kind<F::Env> {
    let _ = instance;
    F::from_reader(Reader::ask())
}

/// A projection of the environment as the value.
pub fn asks<F, A, G>(instance: F, projection: G) -> F::Kind<A>
where
    F: FromReader,
    A: Value,
    G: Fn(F::Env) -> A + Send + Sync + 'static,
{
    let _ = instance;
    F::from_reader(Reader::asks(projection))
}

/// Lifts a function returning a [`Reader`] into one returning the family.
pub fn from_reader_k<F, A, B, G>(instance: F, function: G) -> impl Fn(A) -> F::Kind<B>
where
    F: FromReader,
    B: Value,
    G: Fn(A) -> Reader<F::Env, B>,
{
    let _ = instance;
    move |argument| F::from_reader(function(argument))
}

/// Chains a function returning a [`Reader`] after `ma`.
pub fn flat_map_reader_k<F, A, B, G>(instance: F, ma: F::Kind<A>, function: G) -> F::Kind<B>
where
    F: FromReader + Flattenable,
    A: Value,
    B: Value,
    G: Fn(A) -> Reader<F::Env, B> + Send + Sync + 'static,
{
    let _ = instance;
    F::flat_map(ma, move |value| F::from_reader(function(value)))
}

// =============================================================================
// FromIO
// =============================================================================

/// Lifts a function returning an [`IO`] into one returning the family.
pub fn from_io_k<F, A, B, G>(instance: F, function: G) -> impl Fn(A) -> F::Kind<B>
where
    F: FromIO,
    B: Value,
    G: Fn(A) -> IO<B>,
{
    let _ = instance;
    move |argument| F::from_io(function(argument))
}

/// Chains a function returning an [`IO`] after `ma`.
pub fn flat_map_io_k<F, A, B, G>(instance: F, ma: F::Kind<A>, function: G) -> F::Kind<B>
where
    F: FromIO + Flattenable,
    A: Value,
    B: Value,
    G: Fn(A) -> IO<B> + Send + Sync + 'static,
{
    let _ = instance;
    F::flat_map(ma, move |value| F::from_io(function(value)))
}

// =============================================================================
// FromTask
// =============================================================================

/// Lifts a function returning a [`Task`] into one returning the family.
#[cfg(feature = "async")]
pub fn from_task_k<F, A, B, G>(instance: F, function: G) -> impl Fn(A) -> F::Kind<B>
where
    F: FromTask,
    B: Value,
    G: Fn(A) -> Task<B>,
{
    let _ = instance;
    move |argument| F::from_task(function(argument))
}

/// Chains a function returning a [`Task`] after `ma`.
#[cfg(feature = "async")]
pub fn flat_map_task_k<F, A, B, G>(instance: F, ma: F::Kind<A>, function: G) -> F::Kind<B>
where
    F: FromTask + Flattenable,
    A: Value,
    B: Value,
    G: Fn(A) -> Task<B> + Send + Sync + 'static,
{
    let _ = instance;
    F::flat_map(ma, move |value| F::from_task(function(value)))
}

/// An effect that completes after `duration`.
#[cfg(feature = "async")]
pub fn sleep<F: FromTask>(instance: F, duration: Duration) -> F::Kind<()> {
    let _ = instance;
    F::from_task(Task::sleep(duration))
}

/// Runs `ma` after waiting for `duration`.
#[cfg(feature = "async")]
pub fn delay<F, A>(instance: F, ma: F::Kind<A>, duration: Duration) -> F::Kind<A>
where
    F: FromTask + Flattenable,
    A: Value,
    F::Kind<A>: Clone + Send + Sync + 'static,
{
    F::flat_map(sleep(instance, duration), move |()| ma.clone())
}
