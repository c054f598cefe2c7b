//! [`Command`] for screening a rental applicant.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{screening::Email, Screening},
    infra::{
        backend::{self, Authorized, Credential},
        Backend,
    },
    Service,
};

use super::Command;

/// [`Command`] for screening a rental applicant by its [`Email`].
#[derive(Clone, Debug)]
pub struct ScreenApplicant {
    /// [`Email`] of the applicant to screen.
    pub email: Email,

    /// [`Credential`] to authorize the screening with.
    ///
    /// [`None`] fails the [`Command`] before any request is sent.
    pub credential: Option<Credential>,
}

impl<B> Command<ScreenApplicant> for Service<B>
where
    B: Backend<
        Authorized<Select<By<Screening, Email>>>,
        Ok = Screening,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Screening;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ScreenApplicant,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ScreenApplicant { email, credential } = cmd;

        let credential = credential
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        let screening = self
            .backend()
            .execute(Authorized::new(credential, Select(By::new(email.clone()))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::debug!(
            "applicant `{email}` screened: {}",
            screening.recommendation,
        );

        Ok(screening)
    }
}

/// Error of [`ScreenApplicant`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// No [`Credential`] is provided.
    #[display("Not authenticated")]
    #[from(ignore)]
    Unauthenticated,
}

#[cfg(test)]
pub(crate) mod spec {
    use std::cell::Cell;

    use common::operations::{By, Select};
    use tracerr::Traced;

    use crate::{
        domain::{
            screening::{self, Email},
            Screening,
        },
        infra::{
            backend::{self, http, Authorized, Credential},
            Backend,
        },
        Service,
    };

    use super::{Command as _, ExecutionError, ScreenApplicant};

    /// Fake [`Backend`] answering screenings with a fixed [`Screening`].
    #[derive(Debug, Default)]
    pub(crate) struct Screener {
        /// Number of performed requests.
        pub(crate) calls: Cell<usize>,

        /// Whether to reject the credential.
        pub(crate) reject: Cell<bool>,
    }

    impl Backend<Authorized<Select<By<Screening, Email>>>> for Screener {
        type Ok = Screening;
        type Err = Traced<backend::Error>;

        async fn execute(
            &self,
            op: Authorized<Select<By<Screening, Email>>>,
        ) -> Result<Self::Ok, Self::Err> {
            self.calls.set(self.calls.get() + 1);
            assert_eq!(op.credential.expose(), "token");
            if self.reject.get() {
                return Err(tracerr::new!(backend::Error::from(
                    http::Error::Status {
                        status: 401,
                        message: "token expired".into(),
                    }
                )));
            }
            Ok(screening::spec::blacklisted())
        }
    }

    fn cmd(credential: Option<&str>) -> ScreenApplicant {
        ScreenApplicant {
            email: Email::new("jordan@example.com").unwrap(),
            credential: credential.and_then(Credential::new),
        }
    }

    #[tokio::test]
    async fn screens_with_credential() {
        let svc = Service::new(Screener::default());

        let screening = svc.execute(cmd(Some("token"))).await.unwrap();

        assert_eq!(screening, screening::spec::blacklisted());
        assert_eq!(svc.backend().calls.get(), 1);
    }

    #[tokio::test]
    async fn fails_without_credential_before_request() {
        let svc = Service::new(Screener::default());

        let err = svc.execute(cmd(None)).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Unauthenticated));
        assert_eq!(svc.backend().calls.get(), 0);
    }

    #[tokio::test]
    async fn propagates_backend_failure() {
        let svc = Service::new(Screener::default());
        svc.backend().reject.set(true);

        let err = svc.execute(cmd(Some("token"))).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Backend(_)));
        assert!(err.to_string().contains("401"));
    }
}
