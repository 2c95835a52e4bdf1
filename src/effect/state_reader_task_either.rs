//! StateReaderTaskEither - the general composite effect.
//!
//! A `StateReaderTaskEither<S, R, E, A>` receives a state `S` and an
//! environment `R` and produces, asynchronously, either an error `E` or a
//! value `A` together with the next state. State flows along one execution
//! path, so every composition is sequential: there is a single dictionary,
//! [`StateReaderTaskEitherSeq`].
//!
//! A failure discards the state reached so far.
//!
//! # Examples
//!
//! ```rust,ignore
//! use kindred::control::Either;
//! use kindred::effect::StateReaderTaskEither;
//!
//! type Counter<A> = StateReaderTaskEither<u32, (), String, A>;
//!
//! let next_id = Counter::<u32>::get().flat_map(|current| {
//!     Counter::put(current + 1).map(move |()| current)
//! });
//!
//! assert_eq!(next_id.run(7, ()).await, Either::Right((7, 8)));
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use super::io::IO;
use super::reader::Reader;
use super::reader_task_either::ReaderTaskEither;
use super::task::Task;
use crate::control::{Either, NonEmptyVec};
use crate::record::{Append, Cons, Label, Lacks, Nil};
use crate::typeclass::kind::{Environment, Value, dictionary};
use crate::typeclass::{
    Apply, Flattenable, FromIO, FromReader, FromTask, Functor, Pointed, Provides, TypeLambda,
    applicative, functor, monad,
};

type StateReaderTaskEitherFunction<S, R, E, A> =
    dyn Fn(S, R) -> BoxFuture<'static, Either<E, (A, S)>> + Send + Sync;

/// A stateful asynchronous computation reading `R` that fails with `E` or
/// produces `A` and the next state.
pub struct StateReaderTaskEither<S, R, E, A> {
    run_function: Arc<StateReaderTaskEitherFunction<S, R, E, A>>,
}

impl<S: Value, R: Environment, E: Value, A: Value> StateReaderTaskEither<S, R, E, A> {
    /// Creates an effect from an async function of state and environment.
    pub fn new<F, Fut>(function: F) -> Self
    where
        F: Fn(S, R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Either<E, (A, S)>> + Send + 'static,
    {
        Self {
            run_function: Arc::new(move |state, environment| function(state, environment).boxed()),
        }
    }

    /// Builds the future of one run from `state` against `environment`.
    #[inline]
    pub fn run(&self, state: S, environment: R) -> BoxFuture<'static, Either<E, (A, S)>> {
        (self.run_function)(state, environment)
    }

    /// Runs from `state` and keeps only the value.
    pub fn evaluate(self, state: S) -> ReaderTaskEither<R, E, A>
    where
        S: Clone + Sync,
    {
        ReaderTaskEither::new(move |environment| {
            self.run(state.clone(), environment)
                .map(|outcome| outcome.map(|(value, _)| value))
        })
    }

    /// Runs from `state` and keeps only the final state.
    pub fn execute(self, state: S) -> ReaderTaskEither<R, E, S>
    where
        S: Clone + Sync,
    {
        ReaderTaskEither::new(move |environment| {
            self.run(state.clone(), environment)
                .map(|outcome| outcome.map(|(_, state)| state))
        })
    }

    /// Succeeds with `value`, leaving the state untouched.
    pub fn right(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::new(move |state, _| futures::future::ready(Either::Right((value.clone(), state))))
    }

    /// Alias of [`right`](Self::right).
    pub fn of(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::right(value)
    }

    /// Fails with `error`.
    pub fn left(error: E) -> Self
    where
        E: Clone + Sync,
    {
        Self::new(move |_, _| futures::future::ready(Either::Left(error.clone())))
    }

    /// Computes the value and the next state from the current state.
    pub fn state<F>(function: F) -> Self
    where
        F: Fn(S) -> (A, S) + Send + Sync + 'static,
    {
        Self::new(move |state, _| futures::future::ready(Either::Right(function(state))))
    }

    /// A projection of the current state.
    pub fn gets<F>(projection: F) -> Self
    where
        S: Clone,
        F: Fn(S) -> A + Send + Sync + 'static,
    {
        Self::state(move |state: S| (projection(state.clone()), state))
    }

    /// A projection of the environment.
    pub fn asks<F>(projection: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self::from_reader_task_either(ReaderTaskEither::asks(projection))
    }

    /// Embeds a stateless effect; the state passes through unchanged.
    pub fn from_reader_task_either(effect: ReaderTaskEither<R, E, A>) -> Self {
        Self::new(move |state, environment| {
            effect
                .run(environment)
                .map(move |outcome| outcome.map(move |value| (value, state)))
        })
    }

    /// Embeds a fixed outcome.
    pub fn from_either(either: Either<E, A>) -> Self
    where
        E: Clone + Sync,
        A: Clone + Sync,
    {
        Self::from_reader_task_either(ReaderTaskEither::from_either(either))
    }

    /// `Right(value)` when `predicate` holds, otherwise `Left(on_false(value))`.
    pub fn from_predicate<P, F>(value: A, predicate: P, on_false: F) -> Self
    where
        E: Clone + Sync,
        A: Clone + Sync,
        P: FnOnce(&A) -> bool,
        F: FnOnce(A) -> E,
    {
        Self::from_reader_task_either(ReaderTaskEither::from_predicate(value, predicate, on_false))
    }

    /// `Right` with the narrowed value when `refinement` accepts `value`,
    /// otherwise `Left(on_false(value))`.
    pub fn from_refinement<T, P, F>(value: T, refinement: P, on_false: F) -> Self
    where
        E: Clone + Sync,
        A: Clone + Sync,
        P: FnOnce(T) -> Result<A, T>,
        F: FnOnce(T) -> E,
    {
        Self::from_reader_task_either(ReaderTaskEither::from_refinement(value, refinement, on_false))
    }

    /// Succeeds with the value of `reader`.
    pub fn from_reader(reader: Reader<R, A>) -> Self {
        Self::from_reader_task_either(ReaderTaskEither::right_reader(reader))
    }

    /// Succeeds with the value of `task`.
    pub fn from_task(task: Task<A>) -> Self {
        Self::from_reader_task_either(ReaderTaskEither::right_task(task))
    }

    /// Succeeds with the value of `io`.
    pub fn from_io(io: IO<A>) -> Self {
        Self::from_reader_task_either(ReaderTaskEither::right_io(io))
    }

    /// Transforms the value, leaving the state untouched.
    pub fn map<B, F>(self, function: F) -> StateReaderTaskEither<S, R, E, B>
    where
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        StateReaderTaskEither::new(move |state, environment| {
            let future = self.run(state, environment);
            let function = Arc::clone(&function);
            async move { future.await.map(|(value, state)| (function(value), state)) }
        })
    }

    /// Transforms the error.
    pub fn map_left<E2, F>(self, function: F) -> StateReaderTaskEither<S, R, E2, A>
    where
        E2: Value,
        F: Fn(E) -> E2 + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        StateReaderTaskEither::new(move |state, environment| {
            let future = self.run(state, environment);
            let function = Arc::clone(&function);
            async move { future.await.map_left(|error| function(error)) }
        })
    }

    /// Keeps the value when `predicate` holds, otherwise fails with
    /// `on_false(value)`. An existing error is converted into the new error
    /// type.
    pub fn filter_or_else<E2, P, F>(
        self,
        predicate: P,
        on_false: F,
    ) -> StateReaderTaskEither<S, R, E2, A>
    where
        E: Into<E2>,
        E2: Value,
        P: Fn(&A) -> bool + Send + Sync + 'static,
        F: Fn(A) -> E2 + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let on_false = Arc::new(on_false);
        StateReaderTaskEither::new(move |state, environment| {
            let future = self.run(state, environment);
            let predicate = Arc::clone(&predicate);
            let on_false = Arc::clone(&on_false);
            async move {
                match future.await {
                    Either::Left(error) => Either::Left(error.into()),
                    Either::Right((value, state)) if predicate(&value) => {
                        Either::Right((value, state))
                    }
                    Either::Right((value, _)) => Either::Left(on_false(value)),
                }
            }
        })
    }

    /// The value, or `on_left(error)` with the state the run started from.
    ///
    /// The result never fails, so its error type is free.
    pub fn get_or_else<E2, F>(self, on_left: F) -> StateReaderTaskEither<S, R, E2, A>
    where
        S: Clone,
        E2: Value,
        F: Fn(E) -> A + Send + Sync + 'static,
    {
        let on_left = Arc::new(on_left);
        StateReaderTaskEither::new(move |state: S, environment| {
            let future = self.run(state.clone(), environment);
            let on_left = Arc::clone(&on_left);
            async move {
                match future.await {
                    Either::Left(error) => Either::Right((on_left(error), state)),
                    Either::Right(outcome) => Either::Right(outcome),
                }
            }
        })
    }

    /// Continues with the effect built from the value, from the state this
    /// one left.
    pub fn flat_map<B, F>(self, function: F) -> StateReaderTaskEither<S, R, E, B>
    where
        B: Value,
        F: Fn(A) -> StateReaderTaskEither<S, R, E, B> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        StateReaderTaskEither::new(move |state, environment: R| {
            let future = self.run(state, environment.clone());
            let function = Arc::clone(&function);
            async move {
                match future.await {
                    Either::Left(error) => Either::Left(error),
                    Either::Right((value, state)) => function(value).run(state, environment).await,
                }
            }
        })
    }

    /// Runs `function`'s effect after this one, keeping this one's value and
    /// the state the second one left.
    pub fn tap<B, F>(self, function: F) -> Self
    where
        A: Clone + Sync,
        B: Value,
        F: Fn(&A) -> StateReaderTaskEither<S, R, E, B> + Send + Sync + 'static,
    {
        self.flat_map(move |value| {
            let kept = value.clone();
            function(&value).map(move |_| kept.clone())
        })
    }

    /// Chains a function returning an `Either` whose error converts into `E`.
    /// The state passes through unchanged.
    pub fn flat_map_either_k<E2, B, F>(self, function: F) -> StateReaderTaskEither<S, R, E, B>
    where
        E2: Into<E>,
        B: Value,
        F: Fn(A) -> Either<E2, B> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        StateReaderTaskEither::new(move |state, environment| {
            let future = self.run(state, environment);
            let function = Arc::clone(&function);
            async move {
                match future.await {
                    Either::Left(error) => Either::Left(error),
                    Either::Right((value, state)) => function(value)
                        .widen_error::<E>()
                        .map(move |narrowed| (narrowed, state)),
                }
            }
        })
    }

    /// `flat_map` across environments and errors.
    ///
    /// The result reads an environment providing both requirements and fails
    /// with an error both errors convert into.
    pub fn flat_map_w<R2, E2, R3, E3, B, F>(
        self,
        function: F,
    ) -> StateReaderTaskEither<S, R3, E3, B>
    where
        R2: Environment,
        E2: Value + Into<E3>,
        R3: Environment + Provides<R> + Provides<R2>,
        E: Into<E3>,
        E3: Value,
        B: Value,
        F: Fn(A) -> StateReaderTaskEither<S, R2, E2, B> + Send + Sync + 'static,
    {
        self.widen::<R3, E3>()
            .flat_map(move |value| function(value).widen::<R3, E3>())
    }

    /// Chains a stateless effect over an environment `R` provides and an
    /// error converting into `E`.
    pub fn flat_map_reader_task_either_k<R2, E2, B, F>(
        self,
        function: F,
    ) -> StateReaderTaskEither<S, R, E, B>
    where
        R: Provides<R2>,
        R2: Environment,
        E2: Into<E> + Value,
        B: Value,
        F: Fn(A) -> ReaderTaskEither<R2, E2, B> + Send + Sync + 'static,
    {
        self.flat_map(move |value| {
            StateReaderTaskEither::from_reader_task_either(function(value).widen::<R, E>())
        })
    }

    /// Runs against an environment derived from a wider one.
    pub fn local<R2, F>(self, modifier: F) -> StateReaderTaskEither<S, R2, E, A>
    where
        R2: Environment,
        F: Fn(R2) -> R + Send + Sync + 'static,
    {
        StateReaderTaskEither {
            run_function: Arc::new(move |state: S, environment: R2| {
                self.run(state, modifier(environment))
            }),
        }
    }

    /// Runs against any environment providing `R`.
    pub fn widen_environment<R2>(self) -> StateReaderTaskEither<S, R2, E, A>
    where
        R2: Environment + Provides<R>,
    {
        self.local(|environment: R2| environment.provide())
    }

    /// Reports failures as the wider error type `E2`.
    pub fn widen_error<E2>(self) -> StateReaderTaskEither<S, R, E2, A>
    where
        E: Into<E2>,
        E2: Value,
    {
        self.map_left(Into::into)
    }

    /// Widens environment and error at once.
    pub fn widen<R2, E2>(self) -> StateReaderTaskEither<S, R2, E2, A>
    where
        R2: Environment + Provides<R>,
        E: Into<E2>,
        E2: Value,
    {
        self.widen_error().widen_environment()
    }

    // =========================================================================
    // Do-notation
    // =========================================================================

    /// Wraps the value as the first field of a record.
    pub fn bind_to<L: Label>(self, label: L) -> StateReaderTaskEither<S, R, E, Cons<L, A, Nil>> {
        functor::bind_to(StateReaderTaskEitherSeq::new(), self, label)
    }

    /// Adds a field computed by an effect that may read the record so far.
    pub fn bind<L, B, F>(
        self,
        label: L,
        function: F,
    ) -> StateReaderTaskEither<S, R, E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L> + Clone + Sync,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
        F: Fn(&A) -> StateReaderTaskEither<S, R, E, B> + Send + Sync + 'static,
    {
        monad::bind(StateReaderTaskEitherSeq::new(), self, label, function)
    }

    /// Adds a field from an effect that does not read the record.
    pub fn ap_s<L, B>(
        self,
        label: L,
        fb: StateReaderTaskEither<S, R, E, B>,
    ) -> StateReaderTaskEither<S, R, E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
    {
        applicative::ap_s(StateReaderTaskEitherSeq::new(), self, label, fb)
    }

    /// Adds a field computed purely from the record so far.
    pub fn let_<L, B, F>(
        self,
        label: L,
        function: F,
    ) -> StateReaderTaskEither<S, R, E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
        F: Fn(&A) -> B + Send + Sync + 'static,
    {
        functor::let_(StateReaderTaskEitherSeq::new(), self, label, function)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Runs `function`'s effect for every element in index order, threading
    /// the state, stopping at the first failure.
    pub fn traverse_non_empty_with_index_seq<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> StateReaderTaskEither<S, R, E, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        let items = Arc::new(items);
        let function = Arc::new(function);
        StateReaderTaskEither::new(move |state, environment: R| {
            let items = Arc::clone(&items);
            let function = Arc::clone(&function);
            async move {
                let (head, mut state) =
                    match function(0, items.head().clone()).run(state, environment.clone()).await {
                        Either::Left(error) => {
                            tracing::debug!(index = 0, "stateful traversal stopped at failure");
                            return Either::Left(error);
                        }
                        Either::Right(step) => step,
                    };
                let mut values = NonEmptyVec::singleton(head);
                for (offset, item) in items.tail().iter().enumerate() {
                    match function(offset + 1, item.clone())
                        .run(state, environment.clone())
                        .await
                    {
                        Either::Left(error) => {
                            tracing::debug!(
                                index = offset + 1,
                                "stateful traversal stopped at failure"
                            );
                            return Either::Left(error);
                        }
                        Either::Right((value, next)) => {
                            values.push(value);
                            state = next;
                        }
                    }
                }
                Either::Right((values, state))
            }
        })
    }

    /// Sequential traversal of a non-empty vector.
    pub fn traverse_non_empty_seq<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> StateReaderTaskEither<S, R, E, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_non_empty_with_index_seq(items, move |_, item| function(item))
    }

    /// Sequential traversal of a vector, passing the index.
    ///
    /// An empty input succeeds with an empty vector and the state unchanged.
    pub fn traverse_vec_with_index_seq<T, F>(
        items: Vec<T>,
        function: F,
    ) -> StateReaderTaskEither<S, R, E, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        match NonEmptyVec::from_vec(items) {
            Some(items) => Self::traverse_non_empty_with_index_seq(items, function)
                .map(NonEmptyVec::into_vec),
            None => {
                tracing::trace!("empty traversal, nothing to run");
                StateReaderTaskEither::new(|state, _| {
                    futures::future::ready(Either::Right((Vec::new(), state)))
                })
            }
        }
    }

    /// Sequential traversal of a vector.
    pub fn traverse_vec_seq<T, F>(items: Vec<T>, function: F) -> StateReaderTaskEither<S, R, E, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index_seq(items, move |_, item| function(item))
    }

    /// Runs every effect in order, threading the state.
    pub fn sequence_vec_seq(effects: Vec<Self>) -> StateReaderTaskEither<S, R, E, Vec<A>> {
        Self::traverse_vec_with_index_seq(effects, |_, effect| effect)
    }

    /// Runs every effect of a non-empty vector in order, threading the state.
    pub fn sequence_non_empty_seq(
        effects: NonEmptyVec<Self>,
    ) -> StateReaderTaskEither<S, R, E, NonEmptyVec<A>> {
        Self::traverse_non_empty_with_index_seq(effects, |_, effect| effect)
    }
}

impl<S: Value + Clone, R: Environment, E: Value> StateReaderTaskEither<S, R, E, S> {
    /// The current state.
    #[must_use]
    pub fn get() -> Self {
        Self::state(|state: S| (state.clone(), state))
    }
}

impl<S: Value + Clone + Sync, R: Environment, E: Value> StateReaderTaskEither<S, R, E, ()> {
    /// Replaces the state.
    pub fn put(state: S) -> Self {
        Self::state(move |_| ((), state.clone()))
    }
}

impl<S: Value, R: Environment, E: Value> StateReaderTaskEither<S, R, E, ()> {
    /// Transforms the state.
    pub fn modify<F>(function: F) -> Self
    where
        F: Fn(S) -> S + Send + Sync + 'static,
    {
        Self::state(move |state| ((), function(state)))
    }
}

impl<S: Value, R: Environment, E: Value> StateReaderTaskEither<S, R, E, R> {
    /// The whole environment.
    #[must_use]
    pub fn ask() -> Self {
        Self::asks(|environment| environment)
    }
}

impl<S: Value, R: Environment, E: Value> StateReaderTaskEither<S, R, E, Nil> {
    /// Starts do-notation with the empty record.
    #[must_use]
    pub fn do_() -> Self {
        Self::right(Nil)
    }
}

impl<S: Value, R: Environment, E: Value, A: Value>
    StateReaderTaskEither<S, R, E, StateReaderTaskEither<S, R, E, A>>
{
    /// Collapses a nested effect.
    pub fn flatten(self) -> StateReaderTaskEither<S, R, E, A> {
        self.flat_map(|inner| inner)
    }
}

impl<S: Value, R: Environment, E: Value, G: Value> StateReaderTaskEither<S, R, E, G> {
    /// Applies the produced function to the value of `fa`, which runs from the
    /// state `self` left. A failure of `self` means `fa` never starts.
    pub fn ap<A, B>(self, fa: StateReaderTaskEither<S, R, E, A>) -> StateReaderTaskEither<S, R, E, B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B,
    {
        StateReaderTaskEither::new(move |state, environment: R| {
            let function = self.run(state, environment.clone());
            let fa = fa.clone();
            async move {
                match function.await {
                    Either::Left(error) => Either::Left(error),
                    Either::Right((function, state)) => fa
                        .run(state, environment)
                        .await
                        .map(|(value, state)| (function(value), state)),
                }
            }
        })
    }

    /// `ap` across environments and errors. Still sequential: `fa` runs from
    /// the state `self` left.
    pub fn ap_w<R2, E2, R3, E3, A, B>(
        self,
        fa: StateReaderTaskEither<S, R2, E2, A>,
    ) -> StateReaderTaskEither<S, R3, E3, B>
    where
        R2: Environment,
        E2: Value + Into<E3>,
        R3: Environment + Provides<R> + Provides<R2>,
        E: Into<E3>,
        E3: Value,
        A: Value,
        B: Value,
        G: FnOnce(A) -> B,
    {
        self.widen::<R3, E3>().ap(fa.widen::<R3, E3>())
    }
}

impl<S, R, E, A> Clone for StateReaderTaskEither<S, R, E, A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<S, R, E, A> std::fmt::Display for StateReaderTaskEither<S, R, E, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<StateReaderTaskEither>")
    }
}

impl<S, R, E, A> std::fmt::Debug for StateReaderTaskEither<S, R, E, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("StateReaderTaskEither(<function>)")
    }
}

// =============================================================================
// Typeclass Instances
// =============================================================================

dictionary!(
    /// Typeclass dictionary for [`StateReaderTaskEither`]. Always sequential.
    StateReaderTaskEitherSeq<S, R, E>
);

impl<S: Value, R: Environment, E: Value> TypeLambda for StateReaderTaskEitherSeq<S, R, E> {
    type Kind<A> = StateReaderTaskEither<S, R, E, A>;
}

impl<S: Value, R: Environment, E: Value> Functor for StateReaderTaskEitherSeq<S, R, E> {
    fn map<A, B, F>(
        fa: StateReaderTaskEither<S, R, E, A>,
        function: F,
    ) -> StateReaderTaskEither<S, R, E, B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        fa.map(function)
    }
}

impl<S: Value, R: Environment, E: Value> Apply for StateReaderTaskEitherSeq<S, R, E> {
    fn ap<A, B, G>(
        fab: StateReaderTaskEither<S, R, E, G>,
        fa: StateReaderTaskEither<S, R, E, A>,
    ) -> StateReaderTaskEither<S, R, E, B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B + Value,
    {
        fab.ap(fa)
    }
}

impl<S: Value, R: Environment, E: Value> Pointed for StateReaderTaskEitherSeq<S, R, E> {
    fn of<A>(value: A) -> StateReaderTaskEither<S, R, E, A>
    where
        A: Clone + Send + Sync + 'static,
    {
        StateReaderTaskEither::right(value)
    }
}

impl<S: Value, R: Environment, E: Value> Flattenable for StateReaderTaskEitherSeq<S, R, E> {
    fn flat_map<A, B, F>(
        ma: StateReaderTaskEither<S, R, E, A>,
        function: F,
    ) -> StateReaderTaskEither<S, R, E, B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> StateReaderTaskEither<S, R, E, B> + Send + Sync + 'static,
    {
        ma.flat_map(function)
    }
}

impl<S: Value, R: Environment, E: Value> FromReader for StateReaderTaskEitherSeq<S, R, E> {
    type Env = R;

    fn from_reader<A: Value>(fa: Reader<R, A>) -> StateReaderTaskEither<S, R, E, A> {
        StateReaderTaskEither::from_reader(fa)
    }
}

impl<S: Value, R: Environment, E: Value> FromIO for StateReaderTaskEitherSeq<S, R, E> {
    fn from_io<A: Value>(fa: IO<A>) -> StateReaderTaskEither<S, R, E, A> {
        StateReaderTaskEither::from_io(fa)
    }
}

impl<S: Value, R: Environment, E: Value> FromTask for StateReaderTaskEitherSeq<S, R, E> {
    fn from_task<A: Value>(fa: Task<A>) -> StateReaderTaskEither<S, R, E, A> {
        StateReaderTaskEither::from_task(fa)
    }
}
