//! ReaderTaskEither - asynchronous, failing computations that read an
//! environment.
//!
//! A `ReaderTaskEither<R, E, A>` is a function from an environment `R` to a
//! future producing `Either<E, A>`. It is the workhorse of the composite
//! stack: it reads configuration and capabilities from `R`, suspends
//! asynchronously and fails with `E`.
//!
//! # Composition strategies
//!
//! [`ReaderTaskEither::ap`] and the plain traversals run their operands
//! concurrently and await every operand, even after one has failed; the
//! [`ReaderTaskEitherPar`] dictionary uses them. [`ReaderTaskEither::ap_seq`]
//! and the `_seq` traversals run operands in order and never start an operand
//! after a failure; the [`ReaderTaskEitherSeq`] dictionary uses them. When
//! several operands fail, the error of the leftmost one is reported either way.
//!
//! # Widening
//!
//! Effects over different environments and errors compose after widening:
//! the environment through [`Provides`] and the error through [`Into`].
//!
//! ```rust,ignore
//! use kindred::control::Either;
//! use kindred::effect::ReaderTaskEither;
//!
//! #[derive(Debug, PartialEq)]
//! enum Failure { Parse(String), Missing(i64) }
//!
//! impl From<String> for Failure { fn from(text: String) -> Self { Self::Parse(text) } }
//! impl From<i64> for Failure { fn from(code: i64) -> Self { Self::Missing(code) } }
//!
//! let parse: ReaderTaskEither<(), String, i64> = ReaderTaskEither::right(42);
//! let combined: ReaderTaskEither<(), Failure, i64> =
//!     parse.flat_map_w(|code| ReaderTaskEither::<(), i64, i64>::left(code));
//! assert_eq!(combined.run(()).await, Either::Left(Failure::Missing(42)));
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, join_all};
use tracing::Instrument;

use super::console::{self, ConsoleHandle, Level};
use super::error::TimeoutError;
use super::io::IO;
use super::reader::Reader;
use super::reader_task::ReaderTask;
use super::task::Task;
use crate::control::{Either, NonEmptyVec};
use crate::record::{Append, Cons, Label, Lacks, Nil};
use crate::typeclass::kind::{Environment, Value, dictionary};
use crate::typeclass::{
    Apply, Flattenable, FromIO, FromReader, FromTask, Functor, Pointed, Provides, TypeLambda,
    applicative, functor, monad,
};

type ReaderTaskEitherFunction<R, E, A> =
    dyn Fn(R) -> BoxFuture<'static, Either<E, A>> + Send + Sync;

/// An asynchronous computation reading `R` that fails with `E` or produces `A`.
pub struct ReaderTaskEither<R, E, A> {
    run_function: Arc<ReaderTaskEitherFunction<R, E, A>>,
}

impl<R: Environment, E: Value, A: Value> ReaderTaskEither<R, E, A> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates an effect from an async function of the environment.
    pub fn new<F, Fut>(function: F) -> Self
    where
        F: Fn(R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Either<E, A>> + Send + 'static,
    {
        Self {
            run_function: Arc::new(move |environment| function(environment).boxed()),
        }
    }

    /// Builds the future of one run against `environment`.
    #[inline]
    pub fn run(&self, environment: R) -> BoxFuture<'static, Either<E, A>> {
        (self.run_function)(environment)
    }

    /// An effect succeeding with `value`.
    pub fn right(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::new(move |_| futures::future::ready(Either::Right(value.clone())))
    }

    /// Alias of [`right`](Self::right).
    pub fn of(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::right(value)
    }

    /// An effect failing with `error`.
    pub fn left(error: E) -> Self
    where
        E: Clone + Sync,
    {
        Self::new(move |_| futures::future::ready(Either::Left(error.clone())))
    }

    /// An effect with a fixed outcome.
    pub fn from_either(either: Either<E, A>) -> Self
    where
        E: Clone + Sync,
        A: Clone + Sync,
    {
        Self::new(move |_| futures::future::ready(either.clone()))
    }

    /// Lifts a function returning an `Either` into one returning the effect.
    pub fn from_either_k<T, F>(function: F) -> impl Fn(T) -> Self
    where
        F: Fn(T) -> Either<E, A>,
        E: Clone + Sync,
        A: Clone + Sync,
    {
        move |argument| Self::from_either(function(argument))
    }

    /// `Right(value)` when `predicate` holds, otherwise `Left(on_false(value))`.
    pub fn from_predicate<P, F>(value: A, predicate: P, on_false: F) -> Self
    where
        E: Clone + Sync,
        A: Clone + Sync,
        P: FnOnce(&A) -> bool,
        F: FnOnce(A) -> E,
    {
        Self::from_either(Either::from_predicate(value, predicate, on_false))
    }

    /// `Right` with the narrowed value when `refinement` accepts `value`,
    /// otherwise `Left(on_false(value))` with the value handed back.
    pub fn from_refinement<T, P, F>(value: T, refinement: P, on_false: F) -> Self
    where
        E: Clone + Sync,
        A: Clone + Sync,
        P: FnOnce(T) -> Result<A, T>,
        F: FnOnce(T) -> E,
    {
        Self::from_either(Either::from_refinement(value, refinement, on_false))
    }

    /// A successful async computation of the environment.
    pub fn from_async<F, Fut>(function: F) -> Self
    where
        F: Fn(R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::new(move |environment| function(environment).map(Either::Right))
    }

    /// An async computation of the environment whose `Err` becomes the error.
    pub fn try_from_async<F, Fut>(function: F) -> Self
    where
        F: Fn(R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
    {
        Self::new(move |environment| function(environment).map(Either::from))
    }

    /// Succeeds with the value of `task`.
    pub fn right_task(task: Task<A>) -> Self {
        Self::new(move |_| task.run().map(Either::Right))
    }

    /// Fails with the value of `task`.
    pub fn left_task(task: Task<E>) -> Self {
        Self::new(move |_| task.run().map(Either::Left))
    }

    /// Succeeds with the value of `reader`.
    pub fn right_reader(reader: Reader<R, A>) -> Self {
        Self::new(move |environment| futures::future::ready(Either::Right(reader.run(environment))))
    }

    /// Fails with the value of `reader`.
    pub fn left_reader(reader: Reader<R, E>) -> Self {
        Self::new(move |environment| futures::future::ready(Either::Left(reader.run(environment))))
    }

    /// Succeeds with the value of `io`, performed when the future is polled.
    pub fn right_io(io: IO<A>) -> Self {
        Self::right_task(Task::from_io(io))
    }

    /// Fails with the value of `io`, performed when the future is polled.
    pub fn left_io(io: IO<E>) -> Self {
        Self::left_task(Task::from_io(io))
    }

    /// Succeeds with the value of `reader_task`.
    pub fn right_reader_task(reader_task: ReaderTask<R, A>) -> Self {
        Self::new(move |environment| reader_task.run(environment).map(Either::Right))
    }

    /// Fails with the value of `reader_task`.
    pub fn left_reader_task(reader_task: ReaderTask<R, E>) -> Self {
        Self::new(move |environment| reader_task.run(environment).map(Either::Left))
    }

    /// A projection of the environment.
    pub fn asks<F>(projection: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self::right_reader(Reader::asks(projection))
    }

    /// Builds an effect from the environment and runs it.
    pub fn asks_reader_task_either<F>(function: F) -> Self
    where
        F: Fn(&R) -> Self + Send + Sync + 'static,
    {
        Self {
            run_function: Arc::new(move |environment: R| function(&environment).run(environment)),
        }
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Transforms the success value.
    pub fn map<B, F>(self, function: F) -> ReaderTaskEither<R, E, B>
    where
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        ReaderTaskEither::new(move |environment| {
            let future = self.run(environment);
            let function = Arc::clone(&function);
            async move { future.await.map(|value| function(value)) }
        })
    }

    /// Transforms the error.
    pub fn map_left<E2, F>(self, function: F) -> ReaderTaskEither<R, E2, A>
    where
        E2: Value,
        F: Fn(E) -> E2 + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        ReaderTaskEither::new(move |environment| {
            let future = self.run(environment);
            let function = Arc::clone(&function);
            async move { future.await.map_left(|error| function(error)) }
        })
    }

    /// Transforms whichever of error or value is produced.
    pub fn bimap<E2, B, F, G>(self, on_left: F, on_right: G) -> ReaderTaskEither<R, E2, B>
    where
        E2: Value,
        B: Value,
        F: Fn(E) -> E2 + Send + Sync + 'static,
        G: Fn(A) -> B + Send + Sync + 'static,
    {
        self.map_left(on_left).map(on_right)
    }

    /// Keeps the value when `predicate` holds, otherwise fails with
    /// `on_false(value)`. An existing error is converted into the new error
    /// type.
    pub fn filter_or_else<E2, P, F>(self, predicate: P, on_false: F) -> ReaderTaskEither<R, E2, A>
    where
        E: Into<E2>,
        E2: Value,
        P: Fn(&A) -> bool + Send + Sync + 'static,
        F: Fn(A) -> E2 + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let on_false = Arc::new(on_false);
        ReaderTaskEither::new(move |environment| {
            let future = self.run(environment);
            let predicate = Arc::clone(&predicate);
            let on_false = Arc::clone(&on_false);
            async move {
                future
                    .await
                    .filter_or_else(|value| predicate(value), |value| on_false(value))
            }
        })
    }

    // =========================================================================
    // Sequencing
    // =========================================================================

    /// Runs `continuation` on the success value and the environment.
    fn chain<B, F>(self, continuation: F) -> ReaderTaskEither<R, E, B>
    where
        B: Value,
        F: Fn(A, R) -> BoxFuture<'static, Either<E, B>> + Send + Sync + 'static,
    {
        let continuation = Arc::new(continuation);
        ReaderTaskEither::new(move |environment: R| {
            let future = self.run(environment.clone());
            let continuation = Arc::clone(&continuation);
            async move {
                match future.await {
                    Either::Left(error) => Either::Left(error),
                    Either::Right(value) => continuation(value, environment).await,
                }
            }
        })
    }

    /// Continues with the effect built from the success value, against the
    /// same environment. A failure skips `function`.
    pub fn flat_map<B, F>(self, function: F) -> ReaderTaskEither<R, E, B>
    where
        B: Value,
        F: Fn(A) -> ReaderTaskEither<R, E, B> + Send + Sync + 'static,
    {
        self.chain(move |value, environment| function(value).run(environment))
    }

    /// Runs `function`'s effect after this one, keeping this one's value.
    /// A failure of either fails the result.
    pub fn tap<B, F>(self, function: F) -> Self
    where
        B: Value,
        F: Fn(&A) -> ReaderTaskEither<R, E, B> + Send + Sync + 'static,
    {
        self.chain(move |value, environment| {
            let effect = function(&value).run(environment);
            async move { effect.await.map(move |_| value) }.boxed()
        })
    }

    /// Recovers from a failure with another effect.
    pub fn or_else<E2, F>(self, function: F) -> ReaderTaskEither<R, E2, A>
    where
        E2: Value,
        F: Fn(E) -> ReaderTaskEither<R, E2, A> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        ReaderTaskEither::new(move |environment: R| {
            let future = self.run(environment.clone());
            let function = Arc::clone(&function);
            async move {
                match future.await {
                    Either::Left(error) => function(error).run(environment).await,
                    Either::Right(value) => Either::Right(value),
                }
            }
        })
    }

    /// The success value, or `on_left(error)`.
    pub fn get_or_else<F>(self, on_left: F) -> ReaderTask<R, A>
    where
        F: Fn(E) -> A + Send + Sync + 'static,
    {
        let on_left = Arc::new(on_left);
        ReaderTask::new(move |environment| {
            let future = self.run(environment);
            let on_left = Arc::clone(&on_left);
            async move { future.await.get_or_else(|error| on_left(error)) }
        })
    }

    /// The success value, or the value of the effect `on_left` builds from
    /// the error.
    pub fn get_or_else_e<F>(self, on_left: F) -> ReaderTask<R, A>
    where
        F: Fn(E) -> ReaderTask<R, A> + Send + Sync + 'static,
    {
        let on_left = Arc::new(on_left);
        ReaderTask::new(move |environment: R| {
            let future = self.run(environment.clone());
            let on_left = Arc::clone(&on_left);
            async move {
                match future.await {
                    Either::Left(error) => on_left(error).run(environment).await,
                    Either::Right(value) => value,
                }
            }
        })
    }

    /// Chains a function returning an `Either` whose error converts into `E`.
    pub fn flat_map_either_k<E2, B, F>(self, function: F) -> ReaderTaskEither<R, E, B>
    where
        E2: Into<E>,
        B: Value,
        F: Fn(A) -> Either<E2, B> + Send + Sync + 'static,
    {
        self.chain(move |value, _| futures::future::ready(function(value).widen_error()).boxed())
    }

    /// Chains a function returning a [`Reader`] over an environment `R`
    /// provides.
    pub fn flat_map_reader_k<R2, B, F>(self, function: F) -> ReaderTaskEither<R, E, B>
    where
        R: Provides<R2>,
        R2: 'static,
        B: Value,
        F: Fn(A) -> Reader<R2, B> + Send + Sync + 'static,
    {
        self.chain(move |value, environment| {
            let narrowed: R2 = environment.provide();
            futures::future::ready(Either::Right(function(value).run(narrowed))).boxed()
        })
    }

    /// Chains a function returning a [`Task`].
    pub fn flat_map_task_k<B, F>(self, function: F) -> ReaderTaskEither<R, E, B>
    where
        B: Value,
        F: Fn(A) -> Task<B> + Send + Sync + 'static,
    {
        self.chain(move |value, _| function(value).run().map(Either::Right).boxed())
    }

    /// Chains a function returning an [`IO`].
    pub fn flat_map_io_k<B, F>(self, function: F) -> ReaderTaskEither<R, E, B>
    where
        B: Value,
        F: Fn(A) -> IO<B> + Send + Sync + 'static,
    {
        self.chain(move |value, _| {
            futures::future::ready(Either::Right(function(value).run_unsafe())).boxed()
        })
    }

    /// Chains a function returning a [`ReaderTask`] over an environment `R`
    /// provides.
    pub fn flat_map_reader_task_k<R2, B, F>(self, function: F) -> ReaderTaskEither<R, E, B>
    where
        R: Provides<R2>,
        R2: Environment,
        B: Value,
        F: Fn(A) -> ReaderTask<R2, B> + Send + Sync + 'static,
    {
        self.chain(move |value, environment| {
            let narrowed: R2 = environment.provide();
            function(value).run(narrowed).map(Either::Right).boxed()
        })
    }

    /// Chains a function returning an effect over an environment `R` provides
    /// and an error converting into `E`.
    pub fn flat_map_reader_task_either_k<R2, E2, B, F>(
        self,
        function: F,
    ) -> ReaderTaskEither<R, E, B>
    where
        R: Provides<R2>,
        R2: Environment,
        E2: Into<E> + Value,
        B: Value,
        F: Fn(A) -> ReaderTaskEither<R2, E2, B> + Send + Sync + 'static,
    {
        self.chain(move |value, environment| {
            let narrowed: R2 = environment.provide();
            function(value).run(narrowed).map(Either::widen_error).boxed()
        })
    }

    // =========================================================================
    // Widening
    // =========================================================================

    /// Runs against an environment derived from a wider one.
    pub fn local<R2, F>(self, modifier: F) -> ReaderTaskEither<R2, E, A>
    where
        R2: Environment,
        F: Fn(R2) -> R + Send + Sync + 'static,
    {
        ReaderTaskEither {
            run_function: Arc::new(move |environment: R2| self.run(modifier(environment))),
        }
    }

    /// Runs against any environment providing `R`.
    pub fn widen_environment<R2>(self) -> ReaderTaskEither<R2, E, A>
    where
        R2: Environment + Provides<R>,
    {
        self.local(|environment: R2| environment.provide())
    }

    /// Reports failures as the wider error type `E2`.
    pub fn widen_error<E2>(self) -> ReaderTaskEither<R, E2, A>
    where
        E: Into<E2>,
        E2: Value,
    {
        ReaderTaskEither {
            run_function: Arc::new(move |environment: R| {
                self.run(environment).map(Either::widen_error).boxed()
            }),
        }
    }

    /// Widens environment and error at once.
    pub fn widen<R2, E2>(self) -> ReaderTaskEither<R2, E2, A>
    where
        R2: Environment + Provides<R>,
        E: Into<E2>,
        E2: Value,
    {
        self.widen_error().widen_environment()
    }

    /// `flat_map` across environments and errors.
    ///
    /// The result reads an environment providing both requirements and fails
    /// with an error both errors convert into.
    pub fn flat_map_w<R2, E2, R3, E3, B, F>(self, function: F) -> ReaderTaskEither<R3, E3, B>
    where
        R2: Environment,
        E2: Value + Into<E3>,
        R3: Environment + Provides<R> + Provides<R2>,
        E: Into<E3>,
        E3: Value,
        B: Value,
        F: Fn(A) -> ReaderTaskEither<R2, E2, B> + Send + Sync + 'static,
    {
        self.widen::<R3, E3>()
            .flat_map_reader_task_either_k(function)
    }

    // =========================================================================
    // Observability
    // =========================================================================

    /// Runs every execution inside `span`.
    #[must_use]
    pub fn instrument(self, span: tracing::Span) -> Self {
        ReaderTaskEither {
            run_function: Arc::new(move |environment: R| {
                self.run(environment).instrument(span.clone()).boxed()
            }),
        }
    }

    /// Fails with `on_timeout(error)` when a run takes longer than `duration`.
    ///
    /// The run is dropped when the deadline elapses first.
    #[must_use]
    pub fn timeout<F>(self, duration: Duration, on_timeout: F) -> Self
    where
        F: Fn(TimeoutError) -> E + Send + Sync + 'static,
    {
        let on_timeout = Arc::new(on_timeout);
        Self::new(move |environment| {
            let future = self.run(environment);
            let on_timeout = Arc::clone(&on_timeout);
            async move {
                match tokio::time::timeout(duration, future).await {
                    Ok(either) => either,
                    Err(_) => {
                        tracing::debug!(?duration, "reader task either timed out");
                        Either::Left(on_timeout(TimeoutError { duration }))
                    }
                }
            }
        })
    }

    // =========================================================================
    // Do-notation
    // =========================================================================

    /// Wraps the value as the first field of a record.
    pub fn bind_to<L: Label>(self, label: L) -> ReaderTaskEither<R, E, Cons<L, A, Nil>> {
        functor::bind_to(ReaderTaskEitherPar::new(), self, label)
    }

    /// Adds a field computed by an effect that may read the record so far.
    ///
    /// Sub-effects over narrower environments or errors join with
    /// [`widen`](Self::widen).
    pub fn bind<L, B, F>(
        self,
        label: L,
        function: F,
    ) -> ReaderTaskEither<R, E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L> + Clone + Sync,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
        F: Fn(&A) -> ReaderTaskEither<R, E, B> + Send + Sync + 'static,
    {
        monad::bind(ReaderTaskEitherPar::new(), self, label, function)
    }

    /// Adds a field from an independent effect run concurrently.
    pub fn ap_s<L, B>(
        self,
        label: L,
        fb: ReaderTaskEither<R, E, B>,
    ) -> ReaderTaskEither<R, E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
    {
        applicative::ap_s(ReaderTaskEitherPar::new(), self, label, fb)
    }

    /// Adds a field computed purely from the record so far.
    pub fn let_<L, B, F>(
        self,
        label: L,
        function: F,
    ) -> ReaderTaskEither<R, E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
        F: Fn(&A) -> B + Send + Sync + 'static,
    {
        functor::let_(ReaderTaskEitherPar::new(), self, label, function)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Runs `function`'s effect for every element concurrently, passing the
    /// index.
    ///
    /// Every effect runs to completion. When several fail, the error of the
    /// lowest index is reported.
    pub fn traverse_non_empty_with_index<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> ReaderTaskEither<R, E, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        ReaderTaskEither::new(move |environment: R| {
            let head = function(0, items.head().clone()).run(environment.clone());
            let tail: Vec<_> = items
                .tail()
                .iter()
                .cloned()
                .enumerate()
                .map(|(offset, item)| function(offset + 1, item).run(environment.clone()))
                .collect();
            async move {
                let (head, tail) = futures::join!(head, join_all(tail));
                let mut values = match head {
                    Either::Left(error) => return Either::Left(error),
                    Either::Right(value) => NonEmptyVec::singleton(value),
                };
                for outcome in tail {
                    match outcome {
                        Either::Left(error) => return Either::Left(error),
                        Either::Right(value) => values.push(value),
                    }
                }
                Either::Right(values)
            }
        })
    }

    /// Runs `function`'s effect for every element in index order, stopping at
    /// the first failure. Later elements are never visited.
    pub fn traverse_non_empty_with_index_seq<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> ReaderTaskEither<R, E, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        let items = Arc::new(items);
        let function = Arc::new(function);
        ReaderTaskEither::new(move |environment: R| {
            let items = Arc::clone(&items);
            let function = Arc::clone(&function);
            async move {
                let mut values = match function(0, items.head().clone()).run(environment.clone()).await {
                    Either::Left(error) => {
                        tracing::debug!(index = 0, "sequential traversal stopped at failure");
                        return Either::Left(error);
                    }
                    Either::Right(value) => NonEmptyVec::singleton(value),
                };
                for (offset, item) in items.tail().iter().enumerate() {
                    match function(offset + 1, item.clone()).run(environment.clone()).await {
                        Either::Left(error) => {
                            tracing::debug!(
                                index = offset + 1,
                                "sequential traversal stopped at failure"
                            );
                            return Either::Left(error);
                        }
                        Either::Right(value) => values.push(value),
                    }
                }
                Either::Right(values)
            }
        })
    }

    /// Concurrent traversal of a non-empty vector.
    pub fn traverse_non_empty<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> ReaderTaskEither<R, E, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_non_empty_with_index(items, move |_, item| function(item))
    }

    /// Sequential traversal of a non-empty vector.
    pub fn traverse_non_empty_seq<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> ReaderTaskEither<R, E, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_non_empty_with_index_seq(items, move |_, item| function(item))
    }

    /// Concurrent traversal of a vector, passing the index.
    ///
    /// An empty input succeeds with an empty vector without calling
    /// `function`.
    pub fn traverse_vec_with_index<T, F>(items: Vec<T>, function: F) -> ReaderTaskEither<R, E, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        match NonEmptyVec::from_vec(items) {
            Some(items) => {
                Self::traverse_non_empty_with_index(items, function).map(NonEmptyVec::into_vec)
            }
            None => empty_traversal(),
        }
    }

    /// Sequential traversal of a vector, passing the index.
    pub fn traverse_vec_with_index_seq<T, F>(
        items: Vec<T>,
        function: F,
    ) -> ReaderTaskEither<R, E, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        match NonEmptyVec::from_vec(items) {
            Some(items) => Self::traverse_non_empty_with_index_seq(items, function)
                .map(NonEmptyVec::into_vec),
            None => empty_traversal(),
        }
    }

    /// Concurrent traversal of a vector.
    pub fn traverse_vec<T, F>(items: Vec<T>, function: F) -> ReaderTaskEither<R, E, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index(items, move |_, item| function(item))
    }

    /// Sequential traversal of a vector.
    pub fn traverse_vec_seq<T, F>(items: Vec<T>, function: F) -> ReaderTaskEither<R, E, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index_seq(items, move |_, item| function(item))
    }

    /// Runs every effect concurrently.
    pub fn sequence_vec(effects: Vec<Self>) -> ReaderTaskEither<R, E, Vec<A>> {
        Self::traverse_vec_with_index(effects, |_, effect| effect)
    }

    /// Runs every effect in order, stopping at the first failure.
    pub fn sequence_vec_seq(effects: Vec<Self>) -> ReaderTaskEither<R, E, Vec<A>> {
        Self::traverse_vec_with_index_seq(effects, |_, effect| effect)
    }

    /// Runs every effect of a non-empty vector concurrently.
    pub fn sequence_non_empty(effects: NonEmptyVec<Self>) -> ReaderTaskEither<R, E, NonEmptyVec<A>> {
        Self::traverse_non_empty_with_index(effects, |_, effect| effect)
    }

    /// Runs every effect of a non-empty vector in order.
    pub fn sequence_non_empty_seq(
        effects: NonEmptyVec<Self>,
    ) -> ReaderTaskEither<R, E, NonEmptyVec<A>> {
        Self::traverse_non_empty_with_index_seq(effects, |_, effect| effect)
    }
}

fn empty_traversal<R: Environment, E: Value, A: Value>() -> ReaderTaskEither<R, E, Vec<A>> {
    tracing::trace!("empty traversal, nothing to run");
    ReaderTaskEither::from_async(|_| async { Vec::new() })
}

impl<R: Environment, E: Value> ReaderTaskEither<R, E, R> {
    /// The whole environment.
    #[must_use]
    pub fn ask() -> Self {
        Self::asks(|environment| environment)
    }
}

impl<R: Environment, E: Value> ReaderTaskEither<R, E, Nil> {
    /// Starts do-notation with the empty record.
    #[must_use]
    pub fn do_() -> Self {
        Self::right(Nil)
    }
}

impl<R, E> ReaderTaskEither<R, E, ()>
where
    R: Environment + Provides<ConsoleHandle>,
    E: Value,
{
    /// Writes `message` at [`Level::Log`] to the environment's console.
    pub fn log(message: impl Into<String>) -> Self {
        console::emit(ReaderTaskEitherSeq::new(), Level::Log, message)
    }

    /// Writes `message` at [`Level::Info`] to the environment's console.
    pub fn info(message: impl Into<String>) -> Self {
        console::emit(ReaderTaskEitherSeq::new(), Level::Info, message)
    }

    /// Writes `message` at [`Level::Warn`] to the environment's console.
    pub fn warn(message: impl Into<String>) -> Self {
        console::emit(ReaderTaskEitherSeq::new(), Level::Warn, message)
    }

    /// Writes `message` at [`Level::Error`] to the environment's console.
    pub fn error(message: impl Into<String>) -> Self {
        console::emit(ReaderTaskEitherSeq::new(), Level::Error, message)
    }
}

impl<R: Environment, E: Value, A: Value> ReaderTaskEither<R, E, ReaderTaskEither<R, E, A>> {
    /// Collapses a nested effect.
    pub fn flatten(self) -> ReaderTaskEither<R, E, A> {
        self.flat_map(|inner| inner)
    }
}

impl<R: Environment, E: Value, G: Value> ReaderTaskEither<R, E, G> {
    /// Applies the produced function to the value of `fa`, running both
    /// concurrently against the same environment.
    ///
    /// Both operands are awaited to completion. If both fail, the error of
    /// `self` is reported.
    pub fn ap<A, B>(self, fa: ReaderTaskEither<R, E, A>) -> ReaderTaskEither<R, E, B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B,
    {
        ReaderTaskEither::new(move |environment: R| {
            let function = self.run(environment.clone());
            let value = fa.run(environment);
            async move {
                let (function, value) = futures::join!(function, value);
                function.ap(value)
            }
        })
    }

    /// Applies the produced function to the value of `fa`, starting `fa` only
    /// after `self` succeeded.
    pub fn ap_seq<A, B>(self, fa: ReaderTaskEither<R, E, A>) -> ReaderTaskEither<R, E, B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B,
    {
        self.chain(move |function, environment| {
            fa.run(environment).map(move |value| value.map(function)).boxed()
        })
    }

    /// `ap` across environments and errors, running both concurrently.
    pub fn ap_w<R2, E2, R3, E3, A, B>(
        self,
        fa: ReaderTaskEither<R2, E2, A>,
    ) -> ReaderTaskEither<R3, E3, B>
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

impl<R, E, A> Clone for ReaderTaskEither<R, E, A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<R, E, A> std::fmt::Display for ReaderTaskEither<R, E, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<ReaderTaskEither>")
    }
}

impl<R, E, A> std::fmt::Debug for ReaderTaskEither<R, E, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("ReaderTaskEither(<function>)")
    }
}

// =============================================================================
// Typeclass Instances
// =============================================================================

dictionary!(
    /// Typeclass dictionary for [`ReaderTaskEither`] whose `ap` runs both
    /// operands concurrently.
    ReaderTaskEitherPar<R, E>
);

dictionary!(
    /// Typeclass dictionary for [`ReaderTaskEither`] whose `ap` runs the
    /// operands in order and stops at the first failure.
    ReaderTaskEitherSeq<R, E>
);

macro_rules! reader_task_either_instances {
    ($dictionary:ident, $ap:ident) => {
        impl<R: Environment, E: Value> TypeLambda for $dictionary<R, E> {
            type Kind<A> = ReaderTaskEither<R, E, A>;
        }

        impl<R: Environment, E: Value> Functor for $dictionary<R, E> {
            fn map<A, B, F>(fa: ReaderTaskEither<R, E, A>, function: F) -> ReaderTaskEither<R, E, B>
            where
                A: Value,
                B: Value,
                F: Fn(A) -> B + Send + Sync + 'static,
            {
                fa.map(function)
            }
        }

        impl<R: Environment, E: Value> Apply for $dictionary<R, E> {
            fn ap<A, B, G>(
                fab: ReaderTaskEither<R, E, G>,
                fa: ReaderTaskEither<R, E, A>,
            ) -> ReaderTaskEither<R, E, B>
            where
                A: Value,
                B: Value,
                G: FnOnce(A) -> B + Value,
            {
                fab.$ap(fa)
            }
        }

        impl<R: Environment, E: Value> Pointed for $dictionary<R, E> {
            fn of<A>(value: A) -> ReaderTaskEither<R, E, A>
            where
                A: Clone + Send + Sync + 'static,
            {
                ReaderTaskEither::right(value)
            }
        }

        impl<R: Environment, E: Value> Flattenable for $dictionary<R, E> {
            fn flat_map<A, B, F>(ma: ReaderTaskEither<R, E, A>, function: F) -> ReaderTaskEither<R, E, B>
            where
                A: Value,
                B: Value,
                F: Fn(A) -> ReaderTaskEither<R, E, B> + Send + Sync + 'static,
            {
                ma.flat_map(function)
            }
        }

        impl<R: Environment, E: Value> FromReader for $dictionary<R, E> {
            type Env = R;

            fn from_reader<A: Value>(fa: Reader<R, A>) -> ReaderTaskEither<R, E, A> {
                ReaderTaskEither::right_reader(fa)
            }
        }

        impl<R: Environment, E: Value> FromIO for $dictionary<R, E> {
            fn from_io<A: Value>(fa: IO<A>) -> ReaderTaskEither<R, E, A> {
                ReaderTaskEither::right_io(fa)
            }
        }

        impl<R: Environment, E: Value> FromTask for $dictionary<R, E> {
            fn from_task<A: Value>(fa: Task<A>) -> ReaderTaskEither<R, E, A> {
                ReaderTaskEither::right_task(fa)
            }
        }
    };
}

reader_task_either_instances!(ReaderTaskEitherPar, ap);
reader_task_either_instances!(ReaderTaskEitherSeq, ap_seq);
