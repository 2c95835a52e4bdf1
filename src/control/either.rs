//! Either type - an explicit success-or-failure value.
//!
//! `Either<E, A>` is `Left(E)` (failure) or `Right(A)` (success). It is the
//! synchronous base of the failing effect families: `ReaderTaskEither` and
//! `StateReaderTaskEither` resolve to an `Either` when run.
//!
//! Composition is right-biased: `map`, `flat_map` and `ap` act on `Right` and
//! pass a `Left` through unchanged. When both operands of `ap` are `Left`, the
//! function operand's error is kept.
//!
//! # Examples
//!
//! ```rust
//! use kindred::control::Either;
//!
//! fn parse(text: &str) -> Either<String, i32> {
//!     text.parse::<i32>().map_err(|error| error.to_string()).into()
//! }
//!
//! let doubled = parse("21").map(|value| value * 2);
//! assert_eq!(doubled, Either::Right(42));
//!
//! let fallback = parse("x").get_or_else(|_| 0);
//! assert_eq!(fallback, 0);
//! ```

use crate::record::{self, Append, Cons, Label, Lacks, Nil};
use crate::typeclass::kind::{Value, dictionary};
use crate::typeclass::{Apply, Flattenable, Functor, Pointed, TypeLambda};

/// A value that is either a failure `Left(E)` or a success `Right(A)`.
///
/// # Examples
///
/// ```rust
/// use kindred::control::Either;
///
/// let success: Either<String, i32> = Either::Right(42);
/// let failure: Either<String, i32> = Either::Left("error".to_string());
///
/// assert_eq!(success.map(|x| x * 2), Either::Right(84));
/// assert_eq!(failure.map(|x| x * 2), Either::Left("error".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<E, A> {
    /// The failure branch.
    Left(E),
    /// The success branch.
    Right(A),
}

impl<E, A> Either<E, A> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Lifts a success value.
    #[inline]
    pub const fn of(value: A) -> Self {
        Self::Right(value)
    }

    /// `Right(value)` when `predicate` holds, `Left(on_false(value))` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::control::Either;
    ///
    /// let positive = |n: i32| Either::from_predicate(n, |n| *n > 0, |n| format!("{n} <= 0"));
    /// assert_eq!(positive(1), Either::Right(1));
    /// assert_eq!(positive(-1), Either::Left("-1 <= 0".to_string()));
    /// ```
    pub fn from_predicate<P, F>(value: A, predicate: P, on_false: F) -> Self
    where
        P: FnOnce(&A) -> bool,
        F: FnOnce(A) -> E,
    {
        if predicate(&value) {
            Self::Right(value)
        } else {
            Self::Left(on_false(value))
        }
    }

    /// Narrows `value` with `refinement`.
    ///
    /// A refinement returns `Ok` with the narrowed value, or hands the input
    /// back in `Err`, which `on_false` turns into the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::control::Either;
    ///
    /// let small = |n: i64| {
    ///     Either::from_refinement(n, |n| u8::try_from(n).map_err(|_| n), |n| format!("{n} too big"))
    /// };
    /// assert_eq!(small(7), Either::Right(7u8));
    /// assert_eq!(small(700), Either::Left("700 too big".to_string()));
    /// ```
    pub fn from_refinement<T, R, F>(value: T, refinement: R, on_false: F) -> Self
    where
        R: FnOnce(T) -> Result<A, T>,
        F: FnOnce(T) -> E,
    {
        match refinement(value) {
            Ok(narrowed) => Self::Right(narrowed),
            Err(original) => Self::Left(on_false(original)),
        }
    }

    /// `Right` for `Some`, `Left(on_none())` for `None`.
    pub fn from_option<F>(option: Option<A>, on_none: F) -> Self
    where
        F: FnOnce() -> E,
    {
        option.map_or_else(|| Self::Left(on_none()), Self::Right)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns `true` for `Left`.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` for `Right`.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// The error, if any.
    #[inline]
    pub fn left(self) -> Option<E> {
        match self {
            Self::Left(error) => Some(error),
            Self::Right(_) => None,
        }
    }

    /// The success value, if any.
    #[inline]
    pub fn right(self) -> Option<A> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Borrows the contents.
    #[inline]
    pub const fn as_ref(&self) -> Either<&E, &A> {
        match self {
            Self::Left(error) => Either::Left(error),
            Self::Right(value) => Either::Right(value),
        }
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Transforms the success value.
    #[inline]
    pub fn map<B, F>(self, function: F) -> Either<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Left(error) => Either::Left(error),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Transforms the error.
    #[inline]
    pub fn map_left<E2, F>(self, function: F) -> Either<E2, A>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Left(error) => Either::Left(function(error)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Transforms whichever branch is present.
    pub fn bimap<E2, B, F, G>(self, on_left: F, on_right: G) -> Either<E2, B>
    where
        F: FnOnce(E) -> E2,
        G: FnOnce(A) -> B,
    {
        match self {
            Self::Left(error) => Either::Left(on_left(error)),
            Self::Right(value) => Either::Right(on_right(value)),
        }
    }

    /// Converts the error into a wider error type.
    #[inline]
    pub fn widen_error<E2>(self) -> Either<E2, A>
    where
        E: Into<E2>,
    {
        self.map_left(Into::into)
    }

    /// Collapses both branches into one value.
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(E) -> T,
        G: FnOnce(A) -> T,
    {
        match self {
            Self::Left(error) => on_left(error),
            Self::Right(value) => on_right(value),
        }
    }

    /// Exchanges the branches.
    pub fn swap(self) -> Either<A, E> {
        match self {
            Self::Left(error) => Either::Right(error),
            Self::Right(value) => Either::Left(value),
        }
    }

    // =========================================================================
    // Sequencing
    // =========================================================================

    /// Continues with `function` on success.
    #[inline]
    pub fn flat_map<B, F>(self, function: F) -> Either<E, B>
    where
        F: FnOnce(A) -> Either<E, B>,
    {
        match self {
            Self::Left(error) => Either::Left(error),
            Self::Right(value) => function(value),
        }
    }

    /// Continues with `function`, widening both errors into `E3`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::control::Either;
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum Failure { Text(String), Code(i32) }
    ///
    /// impl From<String> for Failure { fn from(text: String) -> Self { Self::Text(text) } }
    /// impl From<i32> for Failure { fn from(code: i32) -> Self { Self::Code(code) } }
    ///
    /// let first: Either<String, i32> = Either::Right(1);
    /// let chained: Either<Failure, i32> = first.flat_map_w(|_| Either::<i32, i32>::Left(404));
    /// assert_eq!(chained, Either::Left(Failure::Code(404)));
    /// ```
    pub fn flat_map_w<E2, E3, B, F>(self, function: F) -> Either<E3, B>
    where
        F: FnOnce(A) -> Either<E2, B>,
        E: Into<E3>,
        E2: Into<E3>,
    {
        match self {
            Self::Left(error) => Either::Left(error.into()),
            Self::Right(value) => function(value).widen_error(),
        }
    }

    /// Runs `function` for its failure only, keeping the original value.
    pub fn tap<B, F>(self, function: F) -> Self
    where
        F: FnOnce(&A) -> Either<E, B>,
    {
        match self {
            Self::Left(error) => Self::Left(error),
            Self::Right(value) => match function(&value) {
                Either::Left(error) => Self::Left(error),
                Either::Right(_) => Self::Right(value),
            },
        }
    }

    /// Recovers from a failure with another `Either`.
    pub fn or_else<E2, F>(self, function: F) -> Either<E2, A>
    where
        F: FnOnce(E) -> Either<E2, A>,
    {
        match self {
            Self::Left(error) => function(error),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// The success value, or `on_left(error)`.
    #[inline]
    pub fn get_or_else<F>(self, on_left: F) -> A
    where
        F: FnOnce(E) -> A,
    {
        match self {
            Self::Left(error) => on_left(error),
            Self::Right(value) => value,
        }
    }

    /// Keeps `Right(a)` when `predicate(&a)` holds, else fails with `on_false(a)`.
    ///
    /// An existing `Left` passes through, converted into the error type of
    /// `on_false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::control::Either;
    ///
    /// let even = |either: Either<String, i32>| {
    ///     either.filter_or_else(|n| n % 2 == 0, |n| format!("{n} is odd"))
    /// };
    /// assert_eq!(even(Either::Right(2)), Either::Right(2));
    /// assert_eq!(even(Either::Right(3)), Either::Left("3 is odd".to_string()));
    /// assert_eq!(even(Either::Left("bad".into())), Either::Left("bad".to_string()));
    /// ```
    pub fn filter_or_else<E2, P, F>(self, predicate: P, on_false: F) -> Either<E2, A>
    where
        E: Into<E2>,
        P: FnOnce(&A) -> bool,
        F: FnOnce(A) -> E2,
    {
        match self {
            Self::Left(error) => Either::Left(error.into()),
            Self::Right(value) if predicate(&value) => Either::Right(value),
            Self::Right(value) => Either::Left(on_false(value)),
        }
    }

    // =========================================================================
    // Do-notation
    // =========================================================================

    /// Wraps the success value as the first field of a record.
    pub fn bind_to<L: Label>(self, label: L) -> Either<E, Cons<L, A, Nil>> {
        self.map(|value| record::insert(Nil, label, value))
    }

    /// Adds a field computed from the record built so far.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::control::Either;
    /// use kindred::record::Nil;
    ///
    /// kindred::label! {
    ///     Price = "price";
    ///     Total = "total";
    /// }
    ///
    /// let bound: Either<String, _> = Either::Right(Nil)
    ///     .bind(Price, |_| Either::Right(4))
    ///     .bind(Total, |fields| Either::Right(*fields.get(Price) * 3));
    /// assert_eq!(format!("{bound:?}"), "Right({price: 4, total: 12})");
    /// ```
    ///
    /// Binding a name twice does not compile:
    ///
    /// ```rust,compile_fail
    /// use kindred::control::Either;
    /// use kindred::record::Nil;
    ///
    /// kindred::label! {
    ///     Price = "price";
    ///     Repriced = "price";
    /// }
    ///
    /// let bound: Either<String, _> = Either::Right(Nil)
    ///     .bind(Price, |_| Either::Right(4))
    ///     .bind(Repriced, |_| Either::Right(5));
    /// ```
    pub fn bind<L, B, F>(self, label: L, function: F) -> Either<E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        L: Label,
        F: FnOnce(&A) -> Either<E, B>,
    {
        self.flat_map(|accumulated| {
            function(&accumulated).map(|value| record::insert(accumulated, label, value))
        })
    }

    /// Adds a field from an independent `Either`.
    ///
    /// The duplicate-name check applies here too:
    ///
    /// ```rust,compile_fail
    /// use kindred::control::Either;
    /// use kindred::record::Nil;
    ///
    /// kindred::label! {
    ///     Price = "price";
    ///     Repriced = "price";
    /// }
    ///
    /// let bound: Either<String, _> = Either::Right(Nil)
    ///     .ap_s(Price, Either::Right(4))
    ///     .ap_s(Repriced, Either::Right(5));
    /// ```
    pub fn ap_s<L, B>(self, label: L, fb: Either<E, B>) -> Either<E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        L: Label,
    {
        match (self, fb) {
            (Self::Left(error), _) | (Self::Right(_), Either::Left(error)) => Either::Left(error),
            (Self::Right(accumulated), Either::Right(value)) => {
                Either::Right(record::insert(accumulated, label, value))
            }
        }
    }

    /// Adds a field computed purely from the record built so far.
    pub fn let_<L, B, F>(self, label: L, function: F) -> Either<E, <A as Append<L, B>>::Output>
    where
        A: Append<L, B> + Lacks<L>,
        L: Label,
        F: FnOnce(&A) -> B,
    {
        self.map(|accumulated| {
            let value = function(&accumulated);
            record::insert(accumulated, label, value)
        })
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Applies `function` to each element in order, stopping at the first `Left`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::control::Either;
    ///
    /// let halves = Either::traverse_vec_with_index(vec![2, 4, 5, 6], |index, n: i32| {
    ///     if n % 2 == 0 { Either::Right(n / 2) } else { Either::Left(index) }
    /// });
    /// assert_eq!(halves, Either::Left(2));
    /// ```
    pub fn traverse_vec_with_index<T, F>(items: Vec<T>, mut function: F) -> Either<E, Vec<A>>
    where
        F: FnMut(usize, T) -> Self,
    {
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match function(index, item) {
                Self::Left(error) => return Either::Left(error),
                Self::Right(value) => values.push(value),
            }
        }
        Either::Right(values)
    }

    /// Applies `function` to each element in order, stopping at the first `Left`.
    pub fn traverse_vec<T, F>(items: Vec<T>, mut function: F) -> Either<E, Vec<A>>
    where
        F: FnMut(T) -> Self,
    {
        Self::traverse_vec_with_index(items, |_, item| function(item))
    }

    /// Collects a vector of `Either`, returning the first `Left`.
    pub fn sequence_vec(items: Vec<Self>) -> Either<E, Vec<A>> {
        items.into_iter().collect()
    }

    /// Traverses a non-empty vector, passing each element's index.
    pub fn traverse_non_empty_with_index<T, F>(
        items: super::NonEmptyVec<T>,
        mut function: F,
    ) -> Either<E, super::NonEmptyVec<A>>
    where
        F: FnMut(usize, T) -> Self,
    {
        let (head, tail) = items.into_parts();
        function(0, head).flat_map(|head| {
            Self::traverse_vec_with_index(tail, |index, item| function(index + 1, item))
                .map(|tail| super::NonEmptyVec::new(head, tail))
        })
    }

    /// Traverses a non-empty vector.
    pub fn traverse_non_empty<T, F>(
        items: super::NonEmptyVec<T>,
        mut function: F,
    ) -> Either<E, super::NonEmptyVec<A>>
    where
        F: FnMut(T) -> Self,
    {
        Self::traverse_non_empty_with_index(items, |_, item| function(item))
    }
}

impl<E> Either<E, Nil> {
    /// Starts do-notation with the empty record.
    pub const fn do_() -> Self {
        Self::Right(Nil)
    }
}

impl<E, A> Either<E, Either<E, A>> {
    /// Collapses a nested `Either`.
    pub fn flatten(self) -> Either<E, A> {
        self.flat_map(|inner| inner)
    }
}

impl<E, G> Either<E, G> {
    /// Applies the contained function to the value of `fa`.
    ///
    /// If both are `Left`, the error of `self` is returned.
    pub fn ap<A, B>(self, fa: Either<E, A>) -> Either<E, B>
    where
        G: FnOnce(A) -> B,
    {
        match (self, fa) {
            (Self::Left(error), _) | (Self::Right(_), Either::Left(error)) => Either::Left(error),
            (Self::Right(function), Either::Right(value)) => Either::Right(function(value)),
        }
    }
}

impl<T> Either<T, T> {
    /// The value of whichever branch is present.
    pub fn merge(self) -> T {
        match self {
            Self::Left(value) | Self::Right(value) => value,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<E, A> From<Result<A, E>> for Either<E, A> {
    /// `Ok` becomes `Right`, `Err` becomes `Left`.
    #[inline]
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<E, A> From<Either<E, A>> for Result<A, E> {
    /// `Right` becomes `Ok`, `Left` becomes `Err`.
    #[inline]
    fn from(either: Either<E, A>) -> Self {
        match either {
            Either::Left(error) => Err(error),
            Either::Right(value) => Ok(value),
        }
    }
}

/// Collects like `Result`: the first `Left` wins and ends the iteration.
impl<E, A, V: FromIterator<A>> FromIterator<Either<E, A>> for Either<E, V> {
    fn from_iter<I: IntoIterator<Item = Either<E, A>>>(iterator: I) -> Self {
        iterator
            .into_iter()
            .map(Result::from)
            .collect::<Result<V, E>>()
            .into()
    }
}

// =============================================================================
// Typeclass Instances
// =============================================================================

dictionary!(
    /// Typeclass dictionary for [`Either`] with error type `E`.
    EitherInstance<E>
);

impl<E: 'static> TypeLambda for EitherInstance<E> {
    type Kind<A> = Either<E, A>;
}

impl<E: 'static> Functor for EitherInstance<E> {
    fn map<A, B, F>(fa: Either<E, A>, function: F) -> Either<E, B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        fa.map(function)
    }
}

impl<E: 'static> Apply for EitherInstance<E> {
    fn ap<A, B, G>(fab: Either<E, G>, fa: Either<E, A>) -> Either<E, B>
    where
        A: Value,
        B: Value,
        G: FnOnce(A) -> B + Value,
    {
        fab.ap(fa)
    }
}

impl<E: 'static> Pointed for EitherInstance<E> {
    fn of<A>(value: A) -> Either<E, A>
    where
        A: Clone + Send + Sync + 'static,
    {
        Either::Right(value)
    }
}

impl<E: 'static> Flattenable for EitherInstance<E> {
    fn flat_map<A, B, F>(ma: Either<E, A>, function: F) -> Either<E, B>
    where
        A: Value,
        B: Value,
        F: Fn(A) -> Either<E, B> + Send + Sync + 'static,
    {
        ma.flat_map(function)
    }
}
