//! # kindred
//!
//! An effect-composition algebra for Rust: value types describing deferred,
//! possibly failing, environment-dependent computations, and type classes
//! that let one set of combinators work across all of them.
//!
//! ## Overview
//!
//! - **Type Classes**: Functor, Apply, Pointed, Flattenable and the lifting
//!   contracts FromReader, FromIO, FromTask
//! - **Base Effects**: Either, Reader, IO, Task
//! - **Composite Stack**: ReaderTask, ReaderTaskEither, StateReaderTaskEither
//! - **Do-Notation**: type-level records built with `bind`, `ap_s` and `let_`
//! - **Traversal**: over `Vec` and `NonEmptyVec`, concurrent or sequential
//!
//! ## Feature Flags
//!
//! - `async` (default): Task, the composite stack and asynchronous traversal
//! - `serde`: `Serialize`/`Deserialize` for `Either` and `NonEmptyVec`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use kindred::prelude::*;
//!
//! kindred::label! {
//!     Width = "width";
//!     Height = "height";
//! }
//!
//! let area = Either::<String, _>::do_()
//!     .bind(Width, |_| Either::Right(3))
//!     .bind(Height, |_| Either::Right(4))
//!     .map(|fields| fields.get(Width) * fields.get(Height));
//!
//! assert_eq!(area, Either::Right(12));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the type classes, the effect types and the record builder.
///
/// # Usage
///
/// ```rust
/// use kindred::prelude::*;
/// ```
pub mod prelude {
    pub use crate::control::*;
    pub use crate::effect::*;
    pub use crate::record::{Cons, Label, Nil, Record};
    pub use crate::typeclass::*;
}

pub mod control;
pub mod effect;
pub mod record;
pub mod typeclass;
