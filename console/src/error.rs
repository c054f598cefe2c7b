//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use tracerr::{Trace, Traced};

/// Error reported by a console [`Command`].
///
/// [`Command`]: crate::args::Command
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] with the provided message and no backtrace.
    #[must_use]
    pub fn new(msg: &impl ToString) -> Self {
        Self {
            backtrace: None,
            message: msg.to_string(),
        }
    }

    /// Creates a new [`Error`] of the provided `context` caused by `err`.
    #[must_use]
    pub fn context(context: impl fmt::Display, err: impl fmt::Display) -> Self {
        Self::new(&format!("{context}: {err}"))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { backtrace, message } = self;

        write!(
            f,
            "{message}{}",
            backtrace
                .iter()
                .format_with("", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

impl<E: fmt::Display> From<Traced<E>> for Error {
    fn from(err: Traced<E>) -> Self {
        Self {
            backtrace: Some(err.trace().clone()),
            message: err.as_ref().to_string(),
        }
    }
}
