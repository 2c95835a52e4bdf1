//! ReaderTask - asynchronous computations that read an environment.
//!
//! A `ReaderTask<R, A>` is a function from an environment `R` to a
//! [`Task`]-like future producing `A`. It cannot fail; see
//! [`ReaderTaskEither`](super::ReaderTaskEither) for the failing variant.
//!
//! # Examples
//!
//! ```rust,ignore
//! use kindred::effect::ReaderTask;
//!
//! let greeting = ReaderTask::asks(|name: String| format!("hello {name}"));
//! assert_eq!(greeting.run("world".to_string()).await, "hello world");
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, join_all};
use tracing::Instrument;

use super::io::IO;
use super::reader::Reader;
use super::task::Task;
use crate::control::NonEmptyVec;
use crate::record::{Append, Cons, Label, Lacks, Nil};
use crate::typeclass::kind::{Environment, Value, dictionary};
use crate::typeclass::{
    Apply, Flattenable, FromIO, FromReader, FromTask, Functor, Pointed, Provides, TypeLambda,
    applicative, functor, monad,
};

type ReaderTaskFunction<R, A> = dyn Fn(R) -> BoxFuture<'static, A> + Send + Sync;

/// An asynchronous computation producing `A` from an environment `R`.
pub struct ReaderTask<R, A> {
    run_function: Arc<ReaderTaskFunction<R, A>>,
}

impl<R: Environment, A: Value> ReaderTask<R, A> {
    /// Creates a ReaderTask from an async function of the environment.
    pub fn new<F, Fut>(function: F) -> Self
    where
        F: Fn(R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            run_function: Arc::new(move |environment| function(environment).boxed()),
        }
    }

    /// Builds the future of one run against `environment`.
    #[inline]
    pub fn run(&self, environment: R) -> BoxFuture<'static, A> {
        (self.run_function)(environment)
    }

    /// A ReaderTask ignoring its environment.
    pub fn of(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::new(move |_| futures::future::ready(value.clone()))
    }

    /// A projection of the environment.
    pub fn asks<F>(projection: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self::new(move |environment| futures::future::ready(projection(environment)))
    }

    /// Builds a ReaderTask from the environment and runs it.
    pub fn asks_reader_task<F>(function: F) -> Self
    where
        F: Fn(&R) -> Self + Send + Sync + 'static,
    {
        Self {
            run_function: Arc::new(move |environment: R| function(&environment).run(environment)),
        }
    }

    /// Embeds a [`Reader`]; it never suspends.
    pub fn from_reader(reader: Reader<R, A>) -> Self {
        Self::new(move |environment| futures::future::ready(reader.run(environment)))
    }

    /// Embeds a [`Task`], ignoring the environment.
    pub fn from_task(task: Task<A>) -> Self {
        Self {
            run_function: Arc::new(move |_: R| task.run()),
        }
    }

    /// Embeds an [`IO`]; it is performed when the future is polled.
    pub fn from_io(io: IO<A>) -> Self {
        Self::from_task(Task::from_io(io))
    }

    /// Transforms the produced value.
    pub fn map<B, F>(self, function: F) -> ReaderTask<R, B>
    where
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        ReaderTask::new(move |environment| {
            let future = self.run(environment);
            let function = Arc::clone(&function);
            async move { function(future.await) }
        })
    }

    /// Continues with the ReaderTask built from the value, against the same
    /// environment.
    pub fn flat_map<B, F>(self, function: F) -> ReaderTask<R, B>
    where
        B: Value,
        F: Fn(A) -> ReaderTask<R, B> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        ReaderTask::new(move |environment: R| {
            let future = self.run(environment.clone());
            let function = Arc::clone(&function);
            async move { function(future.await).run(environment).await }
        })
    }

    /// Runs `function`'s effect after this one, keeping this one's value.
    pub fn tap<B, F>(self, function: F) -> Self
    where
        B: Value,
        F: Fn(&A) -> ReaderTask<R, B> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        ReaderTask::new(move |environment: R| {
            let future = self.run(environment.clone());
            let function = Arc::clone(&function);
            async move {
                let value = future.await;
                function(&value).run(environment).await;
                value
            }
        })
    }

    /// Runs against an environment derived from a wider one.
    pub fn local<R2, F>(self, modifier: F) -> ReaderTask<R2, A>
    where
        R2: Environment,
        F: Fn(R2) -> R + Send + Sync + 'static,
    {
        ReaderTask {
            run_function: Arc::new(move |environment: R2| self.run(modifier(environment))),
        }
    }

    /// Runs against any environment providing `R`.
    pub fn widen_environment<R2>(self) -> ReaderTask<R2, A>
    where
        R2: Environment + Provides<R>,
    {
        self.local(|environment: R2| environment.provide())
    }

    /// Runs every execution inside `span`.
    #[must_use]
    pub fn instrument(self, span: tracing::Span) -> Self {
        ReaderTask {
            run_function: Arc::new(move |environment: R| {
                self.run(environment).instrument(span.clone()).boxed()
            }),
        }
    }

    // =========================================================================
    // Do-notation
    // =========================================================================

    /// Wraps the value as the first field of a record.
    pub fn bind_to<L: Label>(self, label: L) -> ReaderTask<R, Cons<L, A, Nil>> {
        functor::bind_to(ReaderTaskPar::new(), self, label)
    }

    /// Adds a field computed by an effect that may read the record so far.
    pub fn bind<L, B, F>(self, label: L, function: F) -> ReaderTask<R, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L> + Clone + Sync,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
        F: Fn(&A) -> ReaderTask<R, B> + Send + Sync + 'static,
    {
        monad::bind(ReaderTaskPar::new(), self, label, function)
    }

    /// Adds a field from an independent effect run concurrently.
    pub fn ap_s<L, B>(self, label: L, fb: ReaderTask<R, B>) -> ReaderTask<R, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
    {
        applicative::ap_s(ReaderTaskPar::new(), self, label, fb)
    }

    /// Adds a field computed purely from the record so far.
    pub fn let_<L, B, F>(self, label: L, function: F) -> ReaderTask<R, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
        F: Fn(&A) -> B + Send + Sync + 'static,
    {
        functor::let_(ReaderTaskPar::new(), self, label, function)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Runs `function`'s effect for every element concurrently against one
    /// environment, passing the index.
    pub fn traverse_non_empty_with_index<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> ReaderTask<R, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        ReaderTask::new(move |environment: R| {
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
                NonEmptyVec::new(head, tail)
            }
        })
    }

    /// Runs `function`'s effect for every element in index order.
    pub fn traverse_non_empty_with_index_seq<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> ReaderTask<R, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        let items = Arc::new(items);
        let function = Arc::new(function);
        ReaderTask::new(move |environment: R| {
            let items = Arc::clone(&items);
            let function = Arc::clone(&function);
            async move {
                let head = function(0, items.head().clone()).run(environment.clone()).await;
                let mut values = NonEmptyVec::singleton(head);
                for (offset, item) in items.tail().iter().enumerate() {
                    values.push(function(offset + 1, item.clone()).run(environment.clone()).await);
                }
                values
            }
        })
    }

    /// Concurrent traversal of a non-empty vector.
    pub fn traverse_non_empty<T, F>(items: NonEmptyVec<T>, function: F) -> ReaderTask<R, NonEmptyVec<A>>
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
    ) -> ReaderTask<R, NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_non_empty_with_index_seq(items, move |_, item| function(item))
    }

    /// Concurrent traversal of a vector, passing the index.
    ///
    /// An empty input completes with an empty vector without calling
    /// `function`.
    pub fn traverse_vec_with_index<T, F>(items: Vec<T>, function: F) -> ReaderTask<R, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        match NonEmptyVec::from_vec(items) {
            Some(items) => {
                Self::traverse_non_empty_with_index(items, function).map(NonEmptyVec::into_vec)
            }
            None => ReaderTask::new(|_| async { Vec::new() }),
        }
    }

    /// Sequential traversal of a vector, passing the index.
    pub fn traverse_vec_with_index_seq<T, F>(items: Vec<T>, function: F) -> ReaderTask<R, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        match NonEmptyVec::from_vec(items) {
            Some(items) => Self::traverse_non_empty_with_index_seq(items, function)
                .map(NonEmptyVec::into_vec),
            None => ReaderTask::new(|_| async { Vec::new() }),
        }
    }

    /// Concurrent traversal of a vector.
    pub fn traverse_vec<T, F>(items: Vec<T>, function: F) -> ReaderTask<R, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index(items, move |_, item| function(item))
    }

    /// Sequential traversal of a vector.
    pub fn traverse_vec_seq<T, F>(items: Vec<T>, function: F) -> ReaderTask<R, Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index_seq(items, move |_, item| function(item))
    }

    /// Runs every effect concurrently.
    pub fn sequence_vec(effects: Vec<Self>) -> ReaderTask<R, Vec<A>> {
        Self::traverse_vec_with_index(effects, |_, effect| effect)
    }

    /// Runs every effect one after another.
    pub fn sequence_vec_seq(effects: Vec<Self>) -> ReaderTask<R, Vec<A>> {
        Self::traverse_vec_with_index_seq(effects, |_, effect| effect)
    }

    /// Runs every effect of a non-empty vector concurrently.
    pub fn sequence_non_empty(effects: NonEmptyVec<Self>) -> ReaderTask<R, NonEmptyVec<A>> {
        Self::traverse_non_empty_with_index(effects, |_, effect| effect)
    }

    /// Runs every effect of a non-empty vector one after another.
    pub fn sequence_non_empty_seq(effects: NonEmptyVec<Self>) -> ReaderTask<R, NonEmptyVec<A>> {
        Self::traverse_non_empty_with_index_seq(effects, |_, effect| effect)
    }
}

impl<R: Environment> ReaderTask<R, R> {
    /// The whole environment.
    #[must_use]
    pub fn ask() -> Self {
        Self::asks(|environment| environment)
    }
}

impl<R: Environment> ReaderTask<R, Nil> {
    /// Starts do-notation with the empty record.
    #[must_use]
    pub fn do_() -> Self {
        Self::of(Nil)
    }
}

impl<R: Environment, A: Value> ReaderTask<R, ReaderTask<R, A>> {
    /// Collapses a nested ReaderTask.
    pub fn flatten(self) -> ReaderTask<R, A> {
        self.flat_map(|inner| inner)
    }
}

impl<R: Environment, G: Value> ReaderTask<R, G> {
    /// Applies the produced function to the value of `fa`, running both
    /// concurrently against the same environment.
    pub fn ap<A, B>(self, fa: ReaderTask<R, A>) -> ReaderTask<R, B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B,
    {
        ReaderTask::new(move |environment: R| {
            let function = self.run(environment.clone());
            let value = fa.run(environment);
            async move {
                let (function, value) = futures::join!(function, value);
                function(value)
            }
        })
    }

    /// Applies the produced function to the value of `fa`, starting `fa` only
    /// after the function is available.
    pub fn ap_seq<A, B>(self, fa: ReaderTask<R, A>) -> ReaderTask<R, B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B,
    {
        ReaderTask::new(move |environment: R| {
            let function = self.run(environment.clone());
            let fa = fa.clone();
            async move {
                let function = function.await;
                function(fa.run(environment).await)
            }
        })
    }
}

impl<R, A> Clone for ReaderTask<R, A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<R, A> std::fmt::Display for ReaderTask<R, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<ReaderTask>")
    }
}

impl<R, A> std::fmt::Debug for ReaderTask<R, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("ReaderTask(<function>)")
    }
}

// =============================================================================
// Typeclass Instances
// =============================================================================

dictionary!(
    /// Typeclass dictionary for [`ReaderTask`] whose `ap` runs both operands
    /// concurrently.
    ReaderTaskPar<R>
);

dictionary!(
    /// Typeclass dictionary for [`ReaderTask`] whose `ap` runs the operands in
    /// order.
    ReaderTaskSeq<R>
);

macro_rules! reader_task_instances {
    ($dictionary:ident, $ap:ident) => {
        impl<R: Environment> TypeLambda for $dictionary<R> {
            type Kind<A> = ReaderTask<R, A>;
        }

        impl<R: Environment> Functor for $dictionary<R> {
            fn map<A, B, F>(fa: ReaderTask<R, A>, function: F) -> ReaderTask<R, B>
            where
                A: Value,
                B: Value,
                F: Fn(A) -> B + Send + Sync + 'static,
            {
                fa.map(function)
            }
        }

        impl<R: Environment> Apply for $dictionary<R> {
            fn ap<A, B, G>(fab: ReaderTask<R, G>, fa: ReaderTask<R, A>) -> ReaderTask<R, B>
            where
                A: Value,
                B: Value,
                G: FnOnce(A) -> B + Value,
            {
                fab.$ap(fa)
            }
        }

        impl<R: Environment> Pointed for $dictionary<R> {
            fn of<A>(value: A) -> ReaderTask<R, A>
            where
                A: Clone + Send + Sync + 'static,
            {
                ReaderTask::of(value)
            }
        }

        impl<R: Environment> Flattenable for $dictionary<R> {
            fn flat_map<A, B, F>(ma: ReaderTask<R, A>, function: F) -> ReaderTask<R, B>
            where
                A: Value,
                B: Value,
                F: Fn(A) -> ReaderTask<R, B> + Send + Sync + 'static,
            {
                ma.flat_map(function)
            }
        }

        impl<R: Environment> FromReader for $dictionary<R> {
            type Env = R;

            fn from_reader<A: Value>(fa: Reader<R, A>) -> ReaderTask<R, A> {
                ReaderTask::from_reader(fa)
            }
        }

        impl<R: Environment> FromIO for $dictionary<R> {
            fn from_io<A: Value>(fa: IO<A>) -> ReaderTask<R, A> {
                ReaderTask::from_io(fa)
            }
        }

        impl<R: Environment> FromTask for $dictionary<R> {
            fn from_task<A: Value>(fa: Task<A>) -> ReaderTask<R, A> {
                ReaderTask::from_task(fa)
            }
        }
    };
}

reader_task_instances!(ReaderTaskPar, ap);
reader_task_instances!(ReaderTaskSeq, ap_seq);
