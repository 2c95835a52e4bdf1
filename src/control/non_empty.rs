//! Non-empty vectors.
//!
//! [`NonEmptyVec<T>`] holds at least one element, so traversing it always
//! produces at least one result and `head` never fails.
//!
//! # Examples
//!
//! ```rust
//! use kindred::control::NonEmptyVec;
//!
//! let values = NonEmptyVec::new(1, vec![2, 3]);
//! assert_eq!(values.head(), &1);
//! assert_eq!(values.tail(), &[2, 3]);
//! assert_eq!(values.len(), 3);
//! ```

use thiserror::Error;

use crate::typeclass::Semigroup;

/// A vector guaranteed to contain at least one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NonEmptyVec<T> {
    head: T,
    tail: Vec<T>,
}

/// Returned when converting an empty `Vec` into a [`NonEmptyVec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot build a non-empty vector from an empty vector")]
pub struct EmptyVecError;

impl<T> NonEmptyVec<T> {
    /// Creates a vector from its first element and the rest.
    pub const fn new(head: T, tail: Vec<T>) -> Self {
        Self { head, tail }
    }

    /// Creates a one-element vector.
    pub const fn singleton(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Converts a `Vec`, or `None` when it is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kindred::control::NonEmptyVec;
    ///
    /// assert_eq!(NonEmptyVec::from_vec(vec![1, 2]).map(|values| values.len()), Some(2));
    /// assert!(NonEmptyVec::from_vec(Vec::<i32>::new()).is_none());
    /// ```
    pub fn from_vec(vector: Vec<T>) -> Option<Self> {
        let mut elements = vector.into_iter();
        let head = elements.next()?;
        Some(Self::new(head, elements.collect()))
    }

    /// The first element.
    pub const fn head(&self) -> &T {
        &self.head
    }

    /// Every element after the first.
    pub fn tail(&self) -> &[T] {
        &self.tail
    }

    /// The last element.
    pub fn last(&self) -> &T {
        self.tail.last().unwrap_or(&self.head)
    }

    /// The number of elements, at least one.
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Appends an element.
    pub fn push(&mut self, value: T) {
        self.tail.push(value);
    }

    /// Transforms every element, keeping the length.
    pub fn map<U, F>(self, mut function: F) -> NonEmptyVec<U>
    where
        F: FnMut(T) -> U,
    {
        NonEmptyVec::new(
            function(self.head),
            self.tail.into_iter().map(function).collect(),
        )
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Converts into a plain `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        let mut vector = Vec::with_capacity(self.len());
        vector.push(self.head);
        vector.extend(self.tail);
        vector
    }

    /// Splits into the first element and the rest.
    pub fn into_parts(self) -> (T, Vec<T>) {
        (self.head, self.tail)
    }
}

impl<T> TryFrom<Vec<T>> for NonEmptyVec<T> {
    type Error = EmptyVecError;

    fn try_from(vector: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_vec(vector).ok_or(EmptyVecError)
    }
}

impl<T> From<NonEmptyVec<T>> for Vec<T> {
    fn from(values: NonEmptyVec<T>) -> Self {
        values.into_vec()
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::iter::Chain<std::iter::Once<T>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.head).chain(self.tail)
    }
}

impl<T> Semigroup for NonEmptyVec<T> {
    fn combine(mut self, other: Self) -> Self {
        self.tail.push(other.head);
        self.tail.extend(other.tail);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn singleton_has_one_element() {
        let values = NonEmptyVec::singleton(42);
        assert_eq!(values.len(), 1);
        assert_eq!(values.head(), &42);
        assert_eq!(values.last(), &42);
    }

    #[rstest]
    #[case(vec![1], Some((1, vec![])))]
    #[case(vec![1, 2, 3], Some((1, vec![2, 3])))]
    #[case(vec![], None)]
    fn from_vec_splits_head_and_tail(
        #[case] input: Vec<i32>,
        #[case] expected: Option<(i32, Vec<i32>)>,
    ) {
        assert_eq!(NonEmptyVec::from_vec(input).map(NonEmptyVec::into_parts), expected);
    }

    #[rstest]
    fn try_from_empty_vec_fails() {
        let result = NonEmptyVec::<i32>::try_from(Vec::new());
        assert_eq!(result, Err(EmptyVecError));
        assert_eq!(
            EmptyVecError.to_string(),
            "cannot build a non-empty vector from an empty vector"
        );
    }

    #[rstest]
    fn map_preserves_order() {
        let values = NonEmptyVec::new(1, vec![2, 3]).map(|value| value * 10);
        assert_eq!(values.into_vec(), vec![10, 20, 30]);
    }

    #[rstest]
    fn iter_and_into_iter_agree() {
        let values = NonEmptyVec::new('a', vec!['b', 'c']);
        let borrowed: Vec<char> = values.iter().copied().collect();
        let owned: Vec<char> = values.into_iter().collect();
        assert_eq!(borrowed, owned);
    }

    #[rstest]
    fn combine_concatenates() {
        let combined = NonEmptyVec::new(1, vec![2]).combine(NonEmptyVec::singleton(3));
        assert_eq!(combined.into_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn push_extends_tail() {
        let mut values = NonEmptyVec::singleton(1);
        values.push(2);
        assert_eq!(values.last(), &2);
        assert_eq!(values.len(), 2);
    }
}
