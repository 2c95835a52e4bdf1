//! Type classes shared by every effect family.
//!
//! - [`Functor`]: mapping over the produced value
//! - [`Apply`] / [`Pointed`] / [`Applicative`]: combining independent effects
//! - [`Flattenable`] / [`Monad`]: dependent sequential composition
//! - [`FromReader`], [`FromIO`], [`FromTask`]: embedding narrower effects
//! - [`Semigroup`]: associative combination of values
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not have native support for higher-kinded types (HKT). Each
//! effect family is a zero-sized dictionary type implementing [`TypeLambda`],
//! whose Generic Associated Type `Kind<A>` names the effect producing `A`.
//! Derived combinators take the dictionary as their first argument:
//!
//! ```rust
//! use kindred::control::{Either, EitherInstance};
//! use kindred::typeclass::applicative::lift3;
//!
//! let total = lift3(
//!     EitherInstance::<String>::new(),
//!     |a: i32, b: i32, c: i32| a + b + c,
//!     Either::Right(1),
//!     Either::Right(2),
//!     Either::Right(3),
//! );
//! assert_eq!(total, Either::Right(6));
//! ```
//!
//! ## Environment Intersection
//!
//! [`Provides`] describes which narrower environments a wider one can hand
//! out; it is what environment widening is built on.

pub mod applicative;
pub mod functor;
pub mod kind;
pub mod lift;
pub mod monad;
pub mod provides;
pub mod semigroup;
pub mod traversable;

pub use applicative::{Applicative, Apply, Pointed};
pub use functor::Functor;
pub use kind::{Environment, TypeLambda, Value};
#[cfg(feature = "async")]
pub use lift::FromTask;
pub use lift::{FromIO, FromReader};
pub use monad::{Flattenable, Monad};
pub use provides::{Provides, ProvidesBoth};
pub use semigroup::Semigroup;
