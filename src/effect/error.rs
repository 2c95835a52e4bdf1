//! Error types for the effect layers outside the core algebra.
//!
//! Failures of user computations travel in the error slot of the effect
//! (`Either::Left`). The types here describe failures introduced by the
//! optional layers built on top of it, such as timeouts.

use std::time::Duration;

use thiserror::Error;

/// A task did not complete within its deadline.
///
/// # Examples
///
/// ```rust
/// use kindred::effect::TimeoutError;
/// use std::time::Duration;
///
/// let error = TimeoutError { duration: Duration::from_millis(250) };
/// assert_eq!(error.to_string(), "operation timed out after 250ms");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("operation timed out after {duration:?}")]
pub struct TimeoutError {
    /// The deadline that elapsed.
    pub duration: Duration,
}
