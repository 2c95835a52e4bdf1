//! Effect types and the composite stack.
//!
//! # Base Effects
//!
//! - [`Reader`]: computations that read an environment
//! - [`IO`]: deferred synchronous side effects
//! - [`Task`]: deferred asynchronous computations (requires `async`)
//!
//! # Composite Stack (requires `async`)
//!
//! - [`ReaderTask`]: `R -> Future<A>`
//! - [`ReaderTaskEither`]: `R -> Future<Either<E, A>>`
//! - [`StateReaderTaskEither`]: `(S, R) -> Future<Either<E, (A, S)>>`
//!
//! Each effect type comes with its typeclass dictionaries. Families that can
//! run operands concurrently have a Par and a Seq dictionary.
//!
//! Effects are inert values: building one runs nothing, and every run starts
//! from scratch.
//!
//! ```rust
//! use kindred::effect::IO;
//!
//! let io = IO::of(10)
//!     .map(|x| x * 2)
//!     .flat_map(|x| IO::of(x + 1));
//!
//! assert_eq!(io.run_unsafe(), 21);
//! ```
//!
//! # Console
//!
//! [`console`] provides logging as a capability read from the environment.

// =============================================================================
// Base Effects
// =============================================================================

mod io;
mod reader;

pub use io::{IO, IOInstance};
pub use reader::{Reader, ReaderInstance};

#[cfg(feature = "async")]
mod task;

#[cfg(feature = "async")]
pub use task::{Task, TaskPar, TaskSeq};

// =============================================================================
// Composite Stack (requires async feature)
// =============================================================================

#[cfg(feature = "async")]
mod reader_task;
#[cfg(feature = "async")]
mod reader_task_either;
#[cfg(feature = "async")]
mod state_reader_task_either;

#[cfg(feature = "async")]
pub use reader_task::{ReaderTask, ReaderTaskPar, ReaderTaskSeq};
#[cfg(feature = "async")]
pub use reader_task_either::{ReaderTaskEither, ReaderTaskEitherPar, ReaderTaskEitherSeq};
#[cfg(feature = "async")]
pub use state_reader_task_either::{StateReaderTaskEither, StateReaderTaskEitherSeq};

// =============================================================================
// Errors and Console
// =============================================================================

mod error;

pub mod console;

pub use error::TimeoutError;
