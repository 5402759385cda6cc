//! Error handling for uuid4.
//!
//! Generation can fail in exactly one way: the secure random source is
//! unavailable. Formatting never fails. The remaining kinds exist for the
//! command-line front end, which also has to deal with arguments and output
//! streams.
//!
//! # Example
//!
//! ```rust
//! use uuid4::error::{ErrorKind, Result};
//!
//! fn print_one() -> Result<()> {
//!     let id = uuid4::v4()?;
//!     println!("{id}");
//!     Ok(())
//! }
//!
//! if let Err(e) = print_one() {
//!     assert_eq!(e.kind, ErrorKind::Unavailable);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Main error type combining error kind and details.
#[derive(Debug)]
pub struct Error {
    /// Classification of the error
    pub kind: ErrorKind,

    /// Details of the underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl Error {
    /// Attempts to downcast the underlying error to a concrete type.
    ///
    /// # Returns
    /// * `Some(&E)` - If the underlying error is of type `E`
    /// * `None` - If the underlying error is not of type `E`
    #[must_use]
    pub fn downcast<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.error.downcast_ref::<E>()
    }
}

/// Standard result type for uuid4 operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories, numbered after the gRPC status codes they correspond to.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u32)]
pub enum ErrorKind {
    /// Command line input that does not validate.
    #[error("invalid argument specified")]
    InvalidArgument = 3,

    #[error("internal error")]
    Internal = 13,

    /// The secure random source could not deliver bytes.
    #[error("entropy source unavailable")]
    Unavailable = 14,
}

impl Error {
    /// Creates an error for unexpected internal failures.
    pub fn internal<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            kind: ErrorKind::Internal,
            error: error.into(),
        }
    }

    /// Creates an error for invalid arguments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let err = Error::invalid_argument("count must be at least 1");
    /// assert_eq!(err.kind, ErrorKind::InvalidArgument);
    /// ```
    pub fn invalid_argument<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            kind: ErrorKind::InvalidArgument,
            error: error.into(),
        }
    }

    /// Creates an error for an entropy source that failed to deliver.
    ///
    /// Generation performs no recovery, so this is always fatal to the
    /// call that produced it.
    pub fn unavailable<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            kind: ErrorKind::Unavailable,
            error: error.into(),
        }
    }
}

/// Returns the underlying error source.
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.source()
    }
}

/// Formats the error for display, showing both kind and details.
///
/// Format: "{kind}: {details}"
impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}: ", self.kind)?;
        self.error.fmt(fmt)
    }
}

/// Converts IO errors to `Internal`.
///
/// Only the binary does IO, when writing identifiers to its output, so any
/// failure here is an output stream failure regardless of its kind.
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

/// Converts entropy source failures to `Unavailable`.
impl From<getrandom::Error> for Error {
    fn from(e: getrandom::Error) -> Self {
        Self::unavailable(e)
    }
}

/// Converts JSON serialization errors to `Internal`.
#[cfg(feature = "binary")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::internal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn display_shows_kind_and_details() {
        let err = Error::unavailable("no entropy");
        assert_eq!(err.to_string(), "entropy source unavailable: no entropy");
    }

    #[test]
    fn getrandom_errors_are_unavailable() {
        let err = Error::from(getrandom::Error::UNSUPPORTED);
        assert_eq!(err.kind, ErrorKind::Unavailable);
        assert!(err.downcast::<getrandom::Error>().is_some());
    }

    #[test]
    fn io_errors_are_internal() {
        for kind in [
            io::ErrorKind::BrokenPipe,
            io::ErrorKind::InvalidInput,
            io::ErrorKind::InvalidData,
            io::ErrorKind::TimedOut,
        ] {
            let err = Error::from(io::Error::new(kind, "stdout"));
            assert_eq!(err.kind, ErrorKind::Internal, "{kind:?}");
            assert_eq!(err.to_string(), "internal error: stdout");
        }
    }

    #[test]
    fn downcast_to_wrong_type_is_none() {
        let err = Error::internal("plain message");
        assert!(err.downcast::<io::Error>().is_none());
    }
}
