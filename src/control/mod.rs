//! Plain data structures the effects are built from.
//!
//! - [`Either`]: a value that is one of two types, the synchronous failing
//!   effect
//! - [`NonEmptyVec`]: a vector with at least one element, the result of
//!   non-empty traversals
//!
//! # Examples
//!
//! ```rust
//! use kindred::control::{Either, NonEmptyVec};
//!
//! let lengths = Either::<String, _>::traverse_non_empty(
//!     NonEmptyVec::new("ab", vec!["cde"]),
//!     |text: &str| Either::Right(text.len()),
//! );
//! assert_eq!(lengths, Either::Right(NonEmptyVec::new(2, vec![3])));
//! ```

mod either;
mod non_empty;

pub use either::{Either, EitherInstance};
pub use non_empty::{EmptyVecError, NonEmptyVec};
