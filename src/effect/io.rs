//! IO - deferred synchronous side effects.
//!
//! An `IO<A>` describes a side effect producing `A`. Nothing happens until
//! [`IO::run_unsafe`] is called, and every call performs the effect again.
//! IO is the synchronous effect the richer families lift through
//! [`FromIO`](crate::typeclass::FromIO).
//!
//! # Examples
//!
//! ```rust
//! use kindred::effect::IO;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let counter_clone = Arc::clone(&counter);
//!
//! let increment = IO::new(move || counter_clone.fetch_add(1, Ordering::SeqCst) + 1);
//!
//! // Not executed yet
//! assert_eq!(counter.load(Ordering::SeqCst), 0);
//!
//! assert_eq!(increment.run_unsafe(), 1);
//! assert_eq!(increment.run_unsafe(), 2);
//! ```

use std::sync::Arc;

use crate::control::NonEmptyVec;
use crate::typeclass::kind::{Value, dictionary};
use crate::typeclass::{Apply, Flattenable, FromIO, Functor, Pointed, TypeLambda};

/// A deferred synchronous computation producing `A`.
pub struct IO<A> {
    action: Arc<dyn Fn() -> A + Send + Sync>,
}

impl<A: 'static> IO<A> {
    /// Creates an IO from a side-effecting function.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self {
            action: Arc::new(action),
        }
    }

    /// An IO returning `value` without side effects.
    pub fn of(value: A) -> Self
    where
        A: Clone + Send + Sync,
    {
        Self::new(move || value.clone())
    }

    /// Performs the side effect.
    #[inline]
    pub fn run_unsafe(&self) -> A {
        (self.action)()
    }

    /// Transforms the produced value.
    pub fn map<B, F>(self, function: F) -> IO<B>
    where
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let action = self.action;
        IO::new(move || function(action()))
    }

    /// Continues with the IO built from the value.
    pub fn flat_map<B, F>(self, function: F) -> IO<B>
    where
        B: 'static,
        F: Fn(A) -> IO<B> + Send + Sync + 'static,
    {
        let action = self.action;
        IO::new(move || function(action()).run_unsafe())
    }

    /// Runs `function`'s IO after this one, keeping this one's value.
    pub fn tap<B, F>(self, function: F) -> Self
    where
        B: 'static,
        F: Fn(&A) -> IO<B> + Send + Sync + 'static,
    {
        let action = self.action;
        IO::new(move || {
            let value = action();
            function(&value).run_unsafe();
            value
        })
    }
}

impl<A: 'static> IO<A> {
    /// Runs `function`'s IO for each element in order, passing its index.
    pub fn traverse_vec_with_index<T, F>(items: Vec<T>, function: F) -> IO<Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        IO::new(move || {
            items
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, item)| function(index, item).run_unsafe())
                .collect()
        })
    }

    /// Runs `function`'s IO for each element in order.
    pub fn traverse_vec<T, F>(items: Vec<T>, function: F) -> IO<Vec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index(items, move |_, item| function(item))
    }

    /// Runs `function`'s IO for each element of a non-empty vector, passing
    /// its index.
    pub fn traverse_non_empty_with_index<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> IO<NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        IO::new(move || {
            let mut values = NonEmptyVec::singleton(function(0, items.head().clone()).run_unsafe());
            for (offset, item) in items.tail().iter().enumerate() {
                values.push(function(offset + 1, item.clone()).run_unsafe());
            }
            values
        })
    }

    /// Runs `function`'s IO for each element of a non-empty vector.
    pub fn traverse_non_empty<T, F>(items: NonEmptyVec<T>, function: F) -> IO<NonEmptyVec<A>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_non_empty_with_index(items, move |_, item| function(item))
    }

    /// Runs every IO in order.
    pub fn sequence_vec(effects: Vec<Self>) -> IO<Vec<A>> {
        IO::new(move || effects.iter().map(IO::run_unsafe).collect())
    }
}

impl<A: 'static> IO<IO<A>> {
    /// Collapses a nested IO.
    pub fn flatten(self) -> IO<A> {
        self.flat_map(|inner| inner)
    }
}

impl<G: 'static> IO<G> {
    /// Runs this IO, then `fa`, and applies the function to the value.
    pub fn ap<A, B>(self, fa: IO<A>) -> IO<B>
    where
        A: 'static,
        B: 'static,
        G: FnOnce(A) -> B,
    {
        let function_action = self.action;
        let value_action = fa.action;
        IO::new(move || {
            let function = function_action();
            function(value_action())
        })
    }
}

impl<A> Clone for IO<A> {
    fn clone(&self) -> Self {
        Self {
            action: Arc::clone(&self.action),
        }
    }
}

impl<A> std::fmt::Display for IO<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<IO>")
    }
}

impl<A> std::fmt::Debug for IO<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("IO(<action>)")
    }
}

// =============================================================================
// Typeclass Instances
// =============================================================================

dictionary!(
    /// Typeclass dictionary for [`IO`].
    IOInstance
);

impl TypeLambda for IOInstance {
    type Kind<A> = IO<A>;
}

impl Functor for IOInstance {
    fn map<A, B, F>(fa: IO<A>, function: F) -> IO<B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        fa.map(function)
    }
}

impl Apply for IOInstance {
    fn ap<A, B, G>(fab: IO<G>, fa: IO<A>) -> IO<B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B + Value,
    {
        fab.ap(fa)
    }
}

impl Pointed for IOInstance {
    fn of<A>(value: A) -> IO<A>
    where
        A: Clone + Send + Sync + 'static,
    {
        IO::of(value)
    }
}

impl Flattenable for IOInstance {
    fn flat_map<A, B, F>(ma: IO<A>, function: F) -> IO<B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> IO<B> + Send + Sync + 'static,
    {
        ma.flat_map(function)
    }
}

impl FromIO for IOInstance {
    fn from_io<A: Value>(fa: IO<A>) -> IO<A> {
        fa
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    fn display_io() {
        assert_eq!(format!("{}", IO::of(1)), "<IO>");
    }

    #[rstest]
    fn every_run_repeats_the_effect() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        let io = IO::new(move || counter_clone.fetch_add(1, Ordering::SeqCst));

        io.run_unsafe();
        io.clone().run_unsafe();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    fn ap_runs_function_side_first() {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let function_order = Arc::clone(&order);
        let value_order = Arc::clone(&order);

        let function = IO::new(move || {
            function_order.lock().push("function");
            |value: i32| value + 1
        });
        let value = IO::new(move || {
            value_order.lock().push("value");
            41
        });

        assert_eq!(function.ap(value).run_unsafe(), 42);
        assert_eq!(*order.lock(), vec!["function", "value"]);
    }

    #[rstest]
    fn traversal_runs_in_index_order_on_every_run() {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let recorded = Arc::clone(&order);
        let traversal = IO::traverse_non_empty_with_index(
            NonEmptyVec::new("a", vec!["b", "c"]),
            move |index, item: &'static str| {
                let recorded = Arc::clone(&recorded);
                IO::new(move || {
                    recorded.lock().push(index);
                    format!("{item}{index}")
                })
            },
        );
        assert!(order.lock().is_empty());

        assert_eq!(traversal.run_unsafe().into_vec(), vec!["a0", "b1", "c2"]);
        traversal.run_unsafe();
        assert_eq!(*order.lock(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[rstest]
    fn empty_traversal_yields_empty_vec() {
        let traversal = IO::traverse_vec(Vec::<i32>::new(), |_| -> IO<i32> {
            unreachable!("no elements to visit")
        });
        assert!(traversal.run_unsafe().is_empty());
        assert_eq!(IO::sequence_vec(vec![IO::of(1), IO::of(2)]).run_unsafe(), vec![1, 2]);
    }

    #[rstest]
    fn tap_keeps_original_value() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        let io = IO::of(7).tap(move |value| {
            let seen = Arc::clone(&seen_clone);
            let value = *value;
            IO::new(move || seen.store(value, Ordering::SeqCst))
        });
        assert_eq!(io.run_unsafe(), 7);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }
}
