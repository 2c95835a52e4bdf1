//! Task - deferred asynchronous computations.
//!
//! A `Task<A>` describes an asynchronous computation producing `A`. It is
//! inert: [`Task::run`] builds a fresh future each time it is called, and
//! nothing happens until that future is polled. Running a task twice runs it
//! twice; results are never memoized.
//!
//! Tasks cannot fail. Failing asynchronous computations are
//! [`ReaderTaskEither`](super::ReaderTaskEither) values.
//!
//! # Par and Seq
//!
//! [`Task::ap`] starts both operands and awaits them together; the
//! [`TaskPar`] dictionary uses it. [`Task::ap_seq`] awaits the function
//! operand before starting the argument; the [`TaskSeq`] dictionary uses it.
//! Traversals come in both flavours too.
//!
//! # Examples
//!
//! ```rust,ignore
//! use kindred::effect::Task;
//!
//! let task = Task::of(10).map(|x| x * 2).flat_map(|x| Task::of(x + 1));
//! assert_eq!(task.run().await, 21);
//! ```

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, join_all};
use tracing::Instrument;

use super::error::TimeoutError;
use super::io::IO;
use crate::control::NonEmptyVec;
use crate::record::{Append, Cons, Label, Lacks, Nil};
use crate::typeclass::kind::{Value, dictionary};
use crate::typeclass::{
    Apply, Flattenable, FromIO, FromTask, Functor, Pointed, TypeLambda, applicative, functor, monad,
};

type TaskFunction<A> = dyn Fn() -> BoxFuture<'static, A> + Send + Sync;

/// A deferred asynchronous computation producing `A`.
pub struct Task<A> {
    run_function: Arc<TaskFunction<A>>,
}

impl<A: Value> Task<A> {
    /// Creates a Task from a function building the future to await.
    ///
    /// The function is called once per run.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use kindred::effect::Task;
    ///
    /// let task = Task::new(|| async { 10 + 20 });
    /// assert_eq!(task.run().await, 30);
    /// ```
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            run_function: Arc::new(move || action().boxed()),
        }
    }

    /// A Task completing immediately with `value`.
    pub fn of(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::new(move || futures::future::ready(value.clone()))
    }

    /// Embeds an [`IO`]; it is performed when the task is polled.
    pub fn from_io(io: IO<A>) -> Self {
        Self::new(move || {
            let io = io.clone();
            async move { io.run_unsafe() }
        })
    }

    /// Builds the future of one run.
    #[inline]
    pub fn run(&self) -> BoxFuture<'static, A> {
        (self.run_function)()
    }

    /// Transforms the produced value.
    pub fn map<B, F>(self, function: F) -> Task<B>
    where
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let future = self.run();
            let function = Arc::clone(&function);
            async move { function(future.await) }
        })
    }

    /// Continues with the Task built from the value.
    pub fn flat_map<B, F>(self, function: F) -> Task<B>
    where
        B: Value,
        F: Fn(A) -> Task<B> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let future = self.run();
            let function = Arc::clone(&function);
            async move { function(future.await).run().await }
        })
    }

    /// Runs `function`'s task after this one, keeping this one's value.
    pub fn tap<B, F>(self, function: F) -> Self
    where
        B: Value,
        F: Fn(&A) -> Task<B> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let future = self.run();
            let function = Arc::clone(&function);
            async move {
                let value = future.await;
                function(&value).run().await;
                value
            }
        })
    }

    /// Waits for `duration` before each run.
    #[must_use]
    pub fn delay(self, duration: Duration) -> Self {
        Task::sleep(duration).flat_map(move |()| self.clone())
    }

    /// Runs every execution inside `span`.
    #[must_use]
    pub fn instrument(self, span: tracing::Span) -> Self {
        Task::new(move || self.run().instrument(span.clone()))
    }

    /// Races each run against `duration`.
    ///
    /// The run is dropped when the deadline elapses first.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use kindred::effect::Task;
    /// use std::time::Duration;
    ///
    /// let slow = Task::sleep(Duration::from_secs(10)).timeout(Duration::from_millis(100));
    /// assert!(slow.run().await.is_err());
    /// ```
    pub fn timeout(self, duration: Duration) -> Task<Result<A, TimeoutError>> {
        Task::new(move || {
            let future = self.run();
            async move {
                tokio::time::timeout(duration, future).await.map_err(|_| {
                    tracing::debug!(?duration, "task timed out");
                    TimeoutError { duration }
                })
            }
        })
    }

    // =========================================================================
    // Do-notation
    // =========================================================================

    /// Wraps the value as the first field of a record.
    pub fn bind_to<L: Label>(self, label: L) -> Task<Cons<L, A, Nil>> {
        functor::bind_to(TaskPar, self, label)
    }

    /// Adds a field computed by a Task that may read the record so far.
    pub fn bind<L, B, F>(self, label: L, function: F) -> Task<<A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L> + Clone + Sync,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
        F: Fn(&A) -> Task<B> + Send + Sync + 'static,
    {
        monad::bind(TaskPar, self, label, function)
    }

    /// Adds a field from an independent Task run concurrently.
    pub fn ap_s<L, B>(self, label: L, fb: Task<B>) -> Task<<A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
    {
        applicative::ap_s(TaskPar, self, label, fb)
    }

    /// Adds a field computed purely from the record so far.
    pub fn let_<L, B, F>(self, label: L, function: F) -> Task<<A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        <A as Append<L, B>>::Output: Value,
        L: Label,
        B: Value,
        F: Fn(&A) -> B + Send + Sync + 'static,
    {
        functor::let_(TaskPar, self, label, function)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Runs `function`'s task for every element concurrently, passing the index.
    ///
    /// Output order is input order.
    pub fn traverse_non_empty_with_index<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> Task<NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        Task::new(move || {
            let head = function(0, items.head().clone()).run();
            let tail: Vec<_> = items
                .tail()
                .iter()
                .cloned()
                .enumerate()
                .map(|(offset, item)| function(offset + 1, item).run())
                .collect();
            async move {
                let (head, tail) = futures::join!(head, join_all(tail));
                NonEmptyVec::new(head, tail)
            }
        })
    }

    /// Runs `function`'s task for every element, one after another in index
    /// order.
    pub fn traverse_non_empty_with_index_seq<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> Task<NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        let items = Arc::new(items);
        let function = Arc::new(function);
        Task::new(move || {
            let items = Arc::clone(&items);
            let function = Arc::clone(&function);
            async move {
                let head = function(0, items.head().clone()).run().await;
                let mut values = NonEmptyVec::singleton(head);
                for (offset, item) in items.tail().iter().enumerate() {
                    values.push(function(offset + 1, item.clone()).run().await);
                }
                values
            }
        })
    }

    /// Concurrent traversal of a non-empty vector.
    pub fn traverse_non_empty<T, F>(items: NonEmptyVec<T>, function: F) -> Task<NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_non_empty_with_index(items, move |_, item| function(item))
    }

    /// Sequential traversal of a non-empty vector.
    pub fn traverse_non_empty_seq<T, F>(items: NonEmptyVec<T>, function: F) -> Task<NonEmptyVec<A>>
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
    pub fn traverse_vec_with_index<T, F>(items: Vec<T>, function: F) -> Task<Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        match NonEmptyVec::from_vec(items) {
            Some(items) => {
                Self::traverse_non_empty_with_index(items, function).map(NonEmptyVec::into_vec)
            }
            None => Task::new(|| async { Vec::new() }),
        }
    }

    /// Sequential traversal of a vector, passing the index.
    pub fn traverse_vec_with_index_seq<T, F>(items: Vec<T>, function: F) -> Task<Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        match NonEmptyVec::from_vec(items) {
            Some(items) => Self::traverse_non_empty_with_index_seq(items, function)
                .map(NonEmptyVec::into_vec),
            None => Task::new(|| async { Vec::new() }),
        }
    }

    /// Concurrent traversal of a vector.
    pub fn traverse_vec<T, F>(items: Vec<T>, function: F) -> Task<Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index(items, move |_, item| function(item))
    }

    /// Sequential traversal of a vector.
    pub fn traverse_vec_seq<T, F>(items: Vec<T>, function: F) -> Task<Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index_seq(items, move |_, item| function(item))
    }

    /// Runs every task concurrently.
    pub fn sequence_vec(tasks: Vec<Self>) -> Task<Vec<A>> {
        Self::traverse_vec_with_index(tasks, |_, task| task)
    }

    /// Runs every task one after another.
    pub fn sequence_vec_seq(tasks: Vec<Self>) -> Task<Vec<A>> {
        Self::traverse_vec_with_index_seq(tasks, |_, task| task)
    }

    /// Runs every task of a non-empty vector concurrently.
    pub fn sequence_non_empty(tasks: NonEmptyVec<Self>) -> Task<NonEmptyVec<A>> {
        Self::traverse_non_empty_with_index(tasks, |_, task| task)
    }

    /// Runs every task of a non-empty vector one after another.
    pub fn sequence_non_empty_seq(tasks: NonEmptyVec<Self>) -> Task<NonEmptyVec<A>> {
        Self::traverse_non_empty_with_index_seq(tasks, |_, task| task)
    }
}

impl Task<()> {
    /// A Task completing after `duration`.
    #[must_use]
    pub fn sleep(duration: Duration) -> Self {
        Self::new(move || tokio::time::sleep(duration))
    }
}

impl Task<Nil> {
    /// Starts do-notation with the empty record.
    #[must_use]
    pub fn do_() -> Self {
        Self::of(Nil)
    }
}

impl<A: Value> Task<Task<A>> {
    /// Collapses a nested Task.
    pub fn flatten(self) -> Task<A> {
        self.flat_map(|inner| inner)
    }
}

impl<G: Value> Task<G> {
    /// Applies the produced function to the value of `fa`, running both
    /// concurrently.
    ///
    /// Both futures are awaited to completion.
    pub fn ap<A, B>(self, fa: Task<A>) -> Task<B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B,
    {
        Task::new(move || {
            let function = self.run();
            let value = fa.run();
            async move {
                let (function, value) = futures::join!(function, value);
                function(value)
            }
        })
    }

    /// Applies the produced function to the value of `fa`, starting `fa` only
    /// after the function is available.
    pub fn ap_seq<A, B>(self, fa: Task<A>) -> Task<B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B,
    {
        Task::new(move || {
            let function = self.run();
            let fa = fa.clone();
            async move {
                let function = function.await;
                function(fa.run().await)
            }
        })
    }
}

impl<A> Clone for Task<A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<A: Value> IntoFuture for Task<A> {
    type Output = A;
    type IntoFuture = BoxFuture<'static, A>;

    fn into_future(self) -> Self::IntoFuture {
        self.run()
    }
}

impl<A> std::fmt::Display for Task<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<Task>")
    }
}

impl<A> std::fmt::Debug for Task<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Task(<future>)")
    }
}

// =============================================================================
// Typeclass Instances
// =============================================================================

dictionary!(
    /// Typeclass dictionary for [`Task`] whose `ap` runs both operands
    /// concurrently.
    TaskPar
);

dictionary!(
    /// Typeclass dictionary for [`Task`] whose `ap` runs the operands in order.
    TaskSeq
);

macro_rules! task_instances {
    ($dictionary:ident, $ap:ident) => {
        impl TypeLambda for $dictionary {
            type Kind<A> = Task<A>;
        }

        impl Functor for $dictionary {
            fn map<A, B, F>(fa: Task<A>, function: F) -> Task<B>
            where
                A: Value,
                B: Value,
                F: Fn(A) -> B + Send + Sync + 'static,
            {
                fa.map(function)
            }
        }

        impl Apply for $dictionary {
            fn ap<A, B, G>(fab: Task<G>, fa: Task<A>) -> Task<B>
            where
                A: Value,
                B: Value,
                G: FnOnce(A) -> B + Value,
            {
                fab.$ap(fa)
            }
        }

        impl Pointed for $dictionary {
            fn of<A>(value: A) -> Task<A>
            where
                A: Clone + Send + Sync + 'static,
            {
                Task::of(value)
            }
        }

        impl Flattenable for $dictionary {
            fn flat_map<A, B, F>(ma: Task<A>, function: F) -> Task<B>
            where
                A: Value,
                B: Value,
                F: Fn(A) -> Task<B> + Send + Sync + 'static,
            {
                ma.flat_map(function)
            }
        }

        impl FromIO for $dictionary {
            fn from_io<A: Value>(fa: IO<A>) -> Task<A> {
                Task::from_io(fa)
            }
        }

        impl FromTask for $dictionary {
            fn from_task<A: Value>(fa: Task<A>) -> Task<A> {
                fa
            }
        }
    };
}

task_instances!(TaskPar, ap);
task_instances!(TaskSeq, ap_seq);
