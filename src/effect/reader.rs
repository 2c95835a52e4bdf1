//! Reader - computations that read an environment.
//!
//! A `Reader<R, A>` wraps a pure total function `R -> A`. Composing Readers
//! threads the same environment to every part; running one is synchronous and
//! never changes the environment.
//!
//! # Laws
//!
//! ## Functor Laws
//!
//! - Identity: `reader.map(|x| x) == reader`
//! - Composition: `reader.map(f).map(g) == reader.map(|x| g(f(x)))`
//!
//! ## Monad Laws
//!
//! - Left Identity: `Reader::of(a).flat_map(f) == f(a)`
//! - Right Identity: `m.flat_map(Reader::of) == m`
//!
//! ## Reader Laws
//!
//! - Local Identity: `m.local(|r| r) == m`
//! - Ask Retrieval: `Reader::ask().run(r) == r`
//!
//! # Examples
//!
//! ```rust
//! use kindred::effect::Reader;
//!
//! #[derive(Clone)]
//! struct Config {
//!     port: u16,
//!     host: String,
//! }
//!
//! let address = Reader::asks(|config: Config| config.host)
//!     .flat_map(|host| Reader::asks(move |config: Config| format!("{host}:{}", config.port)));
//!
//! let config = Config { port: 8080, host: "localhost".to_string() };
//! assert_eq!(address.run(config), "localhost:8080");
//! ```

use std::sync::Arc;

use crate::control::NonEmptyVec;
use crate::typeclass::kind::{Environment, Value, dictionary};
use crate::typeclass::{Apply, Flattenable, FromReader, Functor, Pointed, Provides, TypeLambda};

/// A computation producing `A` from an environment `R`.
///
/// # Examples
///
/// ```rust
/// use kindred::effect::Reader;
///
/// let computation: Reader<i32, i32> = Reader::ask().flat_map(|environment| Reader::of(environment * 2));
/// assert_eq!(computation.run(21), 42);
/// ```
pub struct Reader<R, A> {
    run_function: Arc<dyn Fn(R) -> A + Send + Sync>,
}

impl<R: 'static, A: 'static> Reader<R, A> {
    /// Creates a Reader from a function of the environment.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self {
            run_function: Arc::new(function),
        }
    }

    /// Runs the Reader against `environment`. Can be called any number of times.
    #[inline]
    pub fn run(&self, environment: R) -> A {
        (self.run_function)(environment)
    }

    /// A Reader ignoring its environment.
    pub fn of(value: A) -> Self
    where
        A: Clone + Send + Sync,
    {
        Self::new(move |_| value.clone())
    }

    /// A projection of the environment.
    pub fn asks<F>(projection: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self::new(projection)
    }

    /// Transforms the produced value.
    pub fn map<B, F>(self, function: F) -> Reader<R, B>
    where
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let original = self.run_function;
        Reader::new(move |environment| function(original(environment)))
    }

    /// Continues with the Reader built from the value.
    pub fn flat_map<B, F>(self, function: F) -> Reader<R, B>
    where
        R: Clone,
        B: 'static,
        F: Fn(A) -> Reader<R, B> + Send + Sync + 'static,
    {
        let original = self.run_function;
        Reader::new(move |environment: R| {
            let value = original(environment.clone());
            function(value).run(environment)
        })
    }

    /// Runs the Reader against an environment derived from a wider one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::effect::Reader;
    ///
    /// let length: Reader<String, usize> = Reader::asks(|text: String| text.len());
    /// let from_number = length.local(|number: i32| number.to_string());
    /// assert_eq!(from_number.run(12345), 5);
    /// ```
    pub fn local<R2, F>(self, modifier: F) -> Reader<R2, A>
    where
        R2: 'static,
        F: Fn(R2) -> R + Send + Sync + 'static,
    {
        let original = self.run_function;
        Reader::new(move |environment| original(modifier(environment)))
    }

    /// Runs the Reader against any environment providing `R`.
    pub fn widen_environment<R2>(self) -> Reader<R2, A>
    where
        R2: Provides<R> + 'static,
    {
        self.local(|environment: R2| environment.provide())
    }

    /// Applies `function` to each element, passing its index, against one
    /// shared environment.
    pub fn traverse_vec_with_index<T, F>(items: Vec<T>, function: F) -> Reader<R, Vec<A>>
    where
        R: Clone,
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        Reader::new(move |environment: R| {
            items
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, item)| function(index, item).run(environment.clone()))
                .collect()
        })
    }

    /// Applies `function` to each element against one shared environment.
    pub fn traverse_vec<T, F>(items: Vec<T>, function: F) -> Reader<R, Vec<A>>
    where
        R: Clone,
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_vec_with_index(items, move |_, item| function(item))
    }

    /// Applies `function` to each element of a non-empty vector, passing its
    /// index.
    pub fn traverse_non_empty_with_index<T, F>(
        items: NonEmptyVec<T>,
        function: F,
    ) -> Reader<R, NonEmptyVec<A>>
    where
        R: Clone,
        T: Clone + Send + Sync + 'static,
        F: Fn(usize, T) -> Self + Send + Sync + 'static,
    {
        Reader::new(move |environment: R| {
            let mut values = NonEmptyVec::singleton(
                function(0, items.head().clone()).run(environment.clone()),
            );
            for (offset, item) in items.tail().iter().enumerate() {
                values.push(function(offset + 1, item.clone()).run(environment.clone()));
            }
            values
        })
    }

    /// Applies `function` to each element of a non-empty vector.
    pub fn traverse_non_empty<T, F>(items: NonEmptyVec<T>, function: F) -> Reader<R, NonEmptyVec<A>>
    where
        R: Clone,
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Self + Send + Sync + 'static,
    {
        Self::traverse_non_empty_with_index(items, move |_, item| function(item))
    }

    /// Runs every Reader against one shared environment.
    pub fn sequence_vec(readers: Vec<Self>) -> Reader<R, Vec<A>>
    where
        R: Clone,
    {
        Reader::new(move |environment: R| {
            readers
                .iter()
                .map(|reader| reader.run(environment.clone()))
                .collect()
        })
    }
}

impl<R: Clone + 'static> Reader<R, R> {
    /// The whole environment.
    #[must_use]
    pub fn ask() -> Self {
        Self::new(|environment| environment)
    }
}

impl<R: Clone + 'static, A: 'static> Reader<R, Reader<R, A>> {
    /// Collapses a nested Reader.
    pub fn flatten(self) -> Reader<R, A> {
        self.flat_map(|inner| inner)
    }
}

impl<R: Clone + 'static, G: 'static> Reader<R, G> {
    /// Applies the produced function to the value of `fa`.
    pub fn ap<A, B>(self, fa: Reader<R, A>) -> Reader<R, B>
    where
        A: 'static,
        B: 'static,
        G: FnOnce(A) -> B,
    {
        let function_reader = self.run_function;
        let value_reader = fa.run_function;
        Reader::new(move |environment: R| {
            let function = function_reader(environment.clone());
            function(value_reader(environment))
        })
    }
}

impl<R, A> Clone for Reader<R, A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<R, A> std::fmt::Display for Reader<R, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<Reader>")
    }
}

impl<R, A> std::fmt::Debug for Reader<R, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Reader(<function>)")
    }
}

// =============================================================================
// Typeclass Instances
// =============================================================================

dictionary!(
    /// Typeclass dictionary for [`Reader`] over environment `R`.
    ReaderInstance<R>
);

impl<R: Environment> TypeLambda for ReaderInstance<R> {
    type Kind<A> = Reader<R, A>;
}

impl<R: Environment> Functor for ReaderInstance<R> {
    fn map<A, B, F>(fa: Reader<R, A>, function: F) -> Reader<R, B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        fa.map(function)
    }
}

impl<R: Environment> Apply for ReaderInstance<R> {
    fn ap<A, B, G>(fab: Reader<R, G>, fa: Reader<R, A>) -> Reader<R, B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B + Value,
    {
        fab.ap(fa)
    }
}

impl<R: Environment> Pointed for ReaderInstance<R> {
    fn of<A>(value: A) -> Reader<R, A>
    where
        A: Clone + Send + Sync + 'static,
    {
        Reader::of(value)
    }
}

impl<R: Environment> Flattenable for ReaderInstance<R> {
    fn flat_map<A, B, F>(ma: Reader<R, A>, function: F) -> Reader<R, B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> Reader<R, B> + Send + Sync + 'static,
    {
        ma.flat_map(function)
    }
}

impl<R: Environment> FromReader for ReaderInstance<R> {
    type Env = R;

    fn from_reader<A: Value>(fa: Reader<R, A>) -> Reader<R, A> {
        fa
    }
}
