//! [`Backend`]-related implementations.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};
use secrecy::{ExposeSecret as _, SecretString};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Backend API operation.
pub use common::Handler as Backend;

/// Bearer credential authorizing [`Backend`] operations.
///
/// Always injected explicitly, never looked up in any ambient state.
#[derive(Clone, Debug)]
pub struct Credential(SecretString);

impl Credential {
    /// Creates a new [`Credential`] out of the provided bearer `token`, if
    /// it's not blank.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then(|| Self(token.into()))
    }

    /// Exposes the bearer token of this [`Credential`].
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// [`Backend`] `operation` performed on behalf of a [`Credential`].
#[derive(Clone, Debug)]
pub struct Authorized<T> {
    /// [`Credential`] to perform the `operation` with.
    pub credential: Credential,

    /// Operation to perform.
    pub operation: T,
}

impl<T> Authorized<T> {
    /// Wraps the provided `operation` to be performed with the provided
    /// [`Credential`].
    #[must_use]
    pub fn new(credential: Credential, operation: T) -> Self {
        Self {
            credential,
            operation,
        }
    }
}

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    Http(http::Error),
}

#[cfg(test)]
mod spec {
    use super::Credential;

    #[test]
    fn credential_is_not_blank_and_not_leaked() {
        assert!(Credential::new("  ").is_none());

        let credential = Credential::new("s3cr3t").unwrap();
        assert_eq!(credential.expose(), "s3cr3t");
        assert!(!format!("{credential:?}").contains("s3cr3t"));
    }
}
