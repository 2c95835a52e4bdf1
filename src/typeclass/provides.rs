//! Environment intersection.
//!
//! An effect that reads `R1` composed with one that reads `R2` needs an
//! environment satisfying both. Such an environment is any type implementing
//! [`Provides<R1>`] and [`Provides<R2>`]: a struct carrying every field ever
//! required, with one `Provides` impl per requirement.
//!
//! Every `Clone` type provides itself, so an effect can always run against its
//! own environment type.
//!
//! # Examples
//!
//! ```rust
//! use kindred::typeclass::Provides;
//!
//! #[derive(Clone)]
//! struct Database { url: String }
//!
//! #[derive(Clone)]
//! struct Clock { offset: i64 }
//!
//! #[derive(Clone)]
//! struct Application { database: Database, clock: Clock }
//!
//! impl Provides<Database> for Application {
//!     fn provide(&self) -> Database { self.database.clone() }
//! }
//!
//! impl Provides<Clock> for Application {
//!     fn provide(&self) -> Clock { self.clock.clone() }
//! }
//!
//! let application = Application {
//!     database: Database { url: "postgres://".to_string() },
//!     clock: Clock { offset: 3 },
//! };
//!
//! let database: Database = application.provide();
//! let clock: Clock = application.provide();
//! assert_eq!(database.url, "postgres://");
//! assert_eq!(clock.offset, 3);
//! ```

/// A type able to hand out the environment `T` of a narrower effect.
pub trait Provides<T> {
    /// Projects the narrower environment out of `self`.
    fn provide(&self) -> T;
}

impl<T: Clone> Provides<T> for T {
    #[inline]
    fn provide(&self) -> T {
        self.clone()
    }
}

/// Shorthand for an environment satisfying two requirements.
pub trait ProvidesBoth<A, B>: Provides<A> + Provides<B> {}

impl<T, A, B> ProvidesBoth<A, B> for T where T: Provides<A> + Provides<B> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Port(u16);

    #[derive(Clone, Debug, PartialEq)]
    struct Host(String);

    #[derive(Clone)]
    struct Server {
        port: Port,
        host: Host,
    }

    impl Provides<Port> for Server {
        fn provide(&self) -> Port {
            self.port.clone()
        }
    }

    impl Provides<Host> for Server {
        fn provide(&self) -> Host {
            self.host.clone()
        }
    }

    fn read_both<R: ProvidesBoth<Port, Host>>(environment: &R) -> (Port, Host) {
        (environment.provide(), environment.provide())
    }

    #[rstest]
    fn every_clone_type_provides_itself() {
        let port = Port(80);
        let provided: Port = port.provide();
        assert_eq!(provided, port);
    }

    #[rstest]
    fn intersection_provides_each_requirement() {
        let server = Server {
            port: Port(8080),
            host: Host("localhost".to_string()),
        };

        assert_eq!(
            read_both(&server),
            (Port(8080), Host("localhost".to_string()))
        );
    }
}
