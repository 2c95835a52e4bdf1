//! Higher-kinded effect families through Generic Associated Types.
//!
//! Rust has no native higher-kinded generics, so an effect family is named by a
//! zero-sized *dictionary type* that implements [`TypeLambda`]. The dictionary's
//! own type parameters fix the slots that stay constant through a composition
//! (State, Environment, Error) and the generic associated type
//! [`TypeLambda::Kind`] varies the Value slot:
//!
//! | Dictionary                          | `Kind<A>`                          |
//! |-------------------------------------|------------------------------------|
//! | `EitherInstance<E>`                 | `Either<E, A>`                     |
//! | `ReaderInstance<R>`                 | `Reader<R, A>`                     |
//! | `IOInstance`                        | `IO<A>`                            |
//! | `TaskPar`, `TaskSeq`                | `Task<A>`                          |
//! | `ReaderTaskPar<R>`, `ReaderTaskSeq<R>` | `ReaderTask<R, A>`              |
//! | `ReaderTaskEitherPar<R, E>`, `ReaderTaskEitherSeq<R, E>` | `ReaderTaskEither<R, E, A>` |
//! | `StateReaderTaskEitherSeq<S, R, E>` | `StateReaderTaskEither<S, R, E, A>` |
//!
//! Because the fixed slots live on the dictionary, every slot of a `Kind` is
//! inferred from the effect values handed to a generic combinator, and the
//! dictionary value itself only selects the strategy.
//!
//! # Example
//!
//! ```rust
//! use kindred::typeclass::{Functor, TypeLambda};
//! use kindred::control::{Either, EitherInstance};
//!
//! fn double<F: Functor>(fa: F::Kind<i32>) -> F::Kind<i32> {
//!     F::map(fa, |value| value * 2)
//! }
//!
//! let doubled = double::<EitherInstance<String>>(Either::Right(21));
//! assert_eq!(doubled, Either::Right(42));
//! ```

/// An effect family whose value slot can be re-instantiated.
///
/// Implementors are zero-sized dictionaries. `Kind<A>` is the concrete effect
/// type producing `A` with every other slot taken from the dictionary.
///
/// # Laws
///
/// 1. **Consistency**: `Kind<A>` for a dictionary `F` differs from
///    `Kind<B>` only in the value it produces; its environment, error and
///    state slots are those of `F`.
pub trait TypeLambda: Copy + Send + Sync + 'static {
    /// The effect type of this family producing `A`.
    type Kind<A>;
}

/// Bound for the Value, Error and State slots.
///
/// Values cross `.await` points and may be moved to another thread by the
/// executor, so they must be `Send` and own their data.
pub trait Value: Send + 'static {}

impl<T: Send + 'static> Value for T {}

/// Bound for the Environment slot.
///
/// An environment is handed to every sub-effect of a composition, possibly
/// concurrently, so it is cloned per branch and shared across threads.
pub trait Environment: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Environment for T {}

/// Declares a zero-sized dictionary type with phantom slot parameters.
///
/// The generated type is `Copy`, `Default`, `Send` and `Sync` regardless of
/// its parameters and has a `const fn new()`.
macro_rules! dictionary {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $name {
            /// Returns the dictionary value.
            #[must_use]
            pub const fn new() -> Self {
                Self
            }
        }
    };
    ($(#[$meta:meta])* $name:ident < $($param:ident),+ >) => {
        $(#[$meta])*
        pub struct $name<$($param),+>(::std::marker::PhantomData<fn() -> ($($param,)+)>);

        impl<$($param),+> $name<$($param),+> {
            /// Returns the dictionary value.
            #[must_use]
            pub const fn new() -> Self {
                Self(::std::marker::PhantomData)
            }
        }

        impl<$($param),+> Clone for $name<$($param),+> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$($param),+> Copy for $name<$($param),+> {}

        impl<$($param),+> Default for $name<$($param),+> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<$($param),+> ::std::fmt::Debug for $name<$($param),+> {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                formatter.write_str(stringify!($name))
            }
        }
    };
}

pub(crate) use dictionary;
