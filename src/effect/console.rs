//! Console logging as an injected capability.
//!
//! There is no global console. Effects that log read a [`ConsoleHandle`] from
//! their environment (`R: Provides<ConsoleHandle>`) and write through it inside
//! an [`IO`], so logging happens when the effect runs and not when it is
//! built.
//!
//! [`TracingConsole`] forwards to `tracing` events with target
//! `kindred::console`. [`RecordingConsole`] keeps entries in memory.
//!
//! # Examples
//!
//! ```rust
//! use kindred::effect::console::{self, ConsoleHandle, Level, RecordingConsole};
//! use std::sync::Arc;
//!
//! let recording = Arc::new(RecordingConsole::new());
//! let handle: ConsoleHandle = recording.clone();
//!
//! let greet = console::info(handle, "hello");
//! assert!(recording.entries().is_empty());
//!
//! greet.run_unsafe();
//! assert_eq!(recording.entries(), vec![(Level::Info, "hello".to_string())]);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::io::IO;
use super::reader::Reader;
use crate::typeclass::{Flattenable, FromIO, FromReader, Provides};

/// Severity of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Diagnostic output.
    Log,
    /// Informational output.
    Info,
    /// Something unexpected that did not fail.
    Warn,
    /// A failure.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Log => "log",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        formatter.write_str(name)
    }
}

/// A sink for console messages.
pub trait Console: Send + Sync {
    /// Writes `message` at `level`.
    fn write(&self, level: Level, message: &str);
}

/// Shared handle to a [`Console`], carried in environments.
pub type ConsoleHandle = Arc<dyn Console>;

/// A console emitting `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl TracingConsole {
    /// A handle to a tracing console.
    #[must_use]
    pub fn handle() -> ConsoleHandle {
        Arc::new(Self)
    }
}

impl Console for TracingConsole {
    fn write(&self, level: Level, message: &str) {
        match level {
            Level::Log => tracing::debug!(target: "kindred::console", "{message}"),
            Level::Info => tracing::info!(target: "kindred::console", "{message}"),
            Level::Warn => tracing::warn!(target: "kindred::console", "{message}"),
            Level::Error => tracing::error!(target: "kindred::console", "{message}"),
        }
    }
}

/// A console keeping every message in memory.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingConsole {
    /// An empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The messages written so far, oldest first.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().clone()
    }
}

impl Console for RecordingConsole {
    fn write(&self, level: Level, message: &str) {
        self.entries.lock().push((level, message.to_owned()));
    }
}

/// Writes `message` at `level` when the returned IO runs.
pub fn write(console: ConsoleHandle, level: Level, message: impl Into<String>) -> IO<()> {
    let message = message.into();
    IO::new(move || console.write(level, &message))
}

/// Writes at [`Level::Log`].
pub fn log(console: ConsoleHandle, message: impl Into<String>) -> IO<()> {
    write(console, Level::Log, message)
}

/// Writes at [`Level::Info`].
pub fn info(console: ConsoleHandle, message: impl Into<String>) -> IO<()> {
    write(console, Level::Info, message)
}

/// Writes at [`Level::Warn`].
pub fn warn(console: ConsoleHandle, message: impl Into<String>) -> IO<()> {
    write(console, Level::Warn, message)
}

/// Writes at [`Level::Error`].
pub fn error(console: ConsoleHandle, message: impl Into<String>) -> IO<()> {
    write(console, Level::Error, message)
}

/// Writes `message` through the console of the environment, in any family
/// that reads an environment and runs side effects.
pub fn emit<F>(instance: F, level: Level, message: impl Into<String>) -> F::Kind<()>
where
    F: FromReader + FromIO + Flattenable,
    F::Env: Provides<ConsoleHandle>,
{
    let _ = instance;
    let message = message.into();
    let console = F::from_reader(Reader::asks(|environment: F::Env| {
        Provides::<ConsoleHandle>::provide(&environment)
    }));
    F::flat_map(console, move |console| {
        F::from_io(write(console, level, message.clone()))
    })
}
