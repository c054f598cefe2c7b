//! [`Command`] for generating recurring rent payments.

use common::operations::{By, Perform};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{payment, Period},
    infra::{
        backend::{self, Authorized, Credential},
        Backend,
    },
    Service,
};

use super::Command;

/// [`Command`] for generating rent payments of every active lease for a
/// [`Period`].
#[derive(Clone, Debug)]
pub struct GeneratePayments {
    /// [`Period`] to generate payments for.
    pub period: Period,

    /// [`Credential`] to authorize the generation with.
    ///
    /// [`None`] fails the [`Command`] before any request is sent.
    pub credential: Option<Credential>,
}

impl<B> Command<GeneratePayments> for Service<B>
where
    B: Backend<
        Authorized<Perform<By<payment::Generation, Period>>>,
        Ok = payment::Generation,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = payment::Generation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: GeneratePayments,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let GeneratePayments { period, credential } = cmd;

        let credential = credential
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        let generation = self
            .backend()
            .execute(Authorized::new(credential, Perform(By::new(period))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::debug!(
            "{} rent payments generated for {period}",
            generation.generated,
        );

        Ok(generation)
    }
}

/// Error of [`GeneratePayments`] [`Command`] execution.
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
mod spec {
    use std::cell::RefCell;

    use common::operations::{By, Perform};
    use tracerr::Traced;

    use crate::{
        domain::{
            payment::{self, Month},
            Period,
        },
        infra::{
            backend::{self, Authorized, Credential},
            Backend,
        },
        Service,
    };

    use super::{Command as _, ExecutionError, GeneratePayments};

    /// Fake [`Backend`] remembering requested [`Period`]s.
    #[derive(Debug, Default)]
    struct Generator {
        requested: RefCell<Vec<Period>>,
    }

    impl Backend<Authorized<Perform<By<payment::Generation, Period>>>>
        for Generator
    {
        type Ok = payment::Generation;
        type Err = Traced<backend::Error>;

        async fn execute(
            &self,
            op: Authorized<Perform<By<payment::Generation, Period>>>,
        ) -> Result<Self::Ok, Self::Err> {
            let Perform(by) = op.operation;
            self.requested.borrow_mut().push(by.into_inner());
            Ok(payment::Generation { generated: 3 })
        }
    }

    fn period() -> Period {
        Period {
            month: Month::new(3).unwrap(),
            year: 2026,
        }
    }

    #[tokio::test]
    async fn generates_for_requested_period() {
        let svc = Service::new(Generator::default());

        let generation = svc
            .execute(GeneratePayments {
                period: period(),
                credential: Credential::new("token"),
            })
            .await
            .unwrap();

        assert_eq!(generation.generated, 3);
        assert_eq!(*svc.backend().requested.borrow(), [period()]);
    }

    #[tokio::test]
    async fn fails_without_credential_before_request() {
        let svc = Service::new(Generator::default());

        let err = svc
            .execute(GeneratePayments {
                period: period(),
                credential: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Unauthenticated));
        assert!(svc.backend().requested.borrow().is_empty());
    }
}
