//! Semigroup type class - types with an associative binary operation.
//!
//! Only what lifting a semigroup through an effect needs lives here: the
//! [`Semigroup`] trait and instances for the standard containers. The lifted
//! form is [`apply_semigroup`](super::applicative::apply_semigroup).
//!
//! # Laws
//!
//! ## Associativity
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```

/// A type class for types with an associative binary operation.
///
/// # Examples
///
/// ```rust
/// use kindred::typeclass::Semigroup;
///
/// assert_eq!(String::from("foo").combine(String::from("bar")), "foobar");
/// assert_eq!(vec![1, 2].combine(vec![3]), vec![1, 2, 3]);
/// ```
pub trait Semigroup {
    /// Combines two values into one. Must be associative.
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Reduces all elements with `combine`, or `None` for an empty iterator.
    fn reduce_all<I>(iterator: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .reduce(|accumulator, element| accumulator.combine(element))
    }
}

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl<T> Semigroup for Vec<T> {
    fn combine(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}

/// `None` is neutral; two `Some` values combine their contents.
impl<T: Semigroup> Semigroup for Option<T> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(left), Some(right)) => Some(left.combine(right)),
            (Some(value), None) | (None, Some(value)) => Some(value),
            (None, None) => None,
        }
    }
}

impl Semigroup for () {
    fn combine(self, _other: Self) -> Self {}
}

impl<A: Semigroup, B: Semigroup> Semigroup for (A, B) {
    fn combine(self, other: Self) -> Self {
        (self.0.combine(other.0), self.1.combine(other.1))
    }
}
