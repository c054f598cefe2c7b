//! [`Controller`] owning the state shared between views.

use std::collections::BTreeMap;

use derive_more::{Display, Error, From};
use service::{
    command::{generate_payments, GeneratePayments},
    domain::{lease, payment, Lease, Notification},
    infra::backend::Credential,
    Command,
};
use tracerr::Traced;
use tracing as log;

use crate::view::Event;

/// Owner of the [`Lease`]s and [`Notification`]s handling [`Event`]s
/// reported by the views.
#[derive(Debug)]
pub struct Controller<S> {
    /// Service executing backend commands.
    service: S,

    /// [`Credential`] injected into backend commands.
    credential: Option<Credential>,

    /// Known [`Lease`]s.
    leases: BTreeMap<lease::Id, Lease>,

    /// Supplied [`Notification`]s.
    notifications: Vec<Notification>,
}

/// Outcome of an [`Event`] handled by a [`Controller`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Nothing to report.
    Done,

    /// [`Lease`] has been stored.
    LeaseStored(lease::Id),

    /// Rent payments have been generated.
    PaymentsGenerated(payment::Generation),
}

impl<S> Controller<S> {
    /// Creates a new [`Controller`] on top of the provided `service`.
    #[must_use]
    pub fn new(service: S, credential: Option<Credential>) -> Self {
        Self {
            service,
            credential,
            leases: BTreeMap::new(),
            notifications: Vec::new(),
        }
    }

    /// Returns the service of this [`Controller`].
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Returns the injected [`Credential`], if any.
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Returns the known [`Lease`] with the provided ID.
    #[must_use]
    pub fn lease(&self, id: lease::Id) -> Option<&Lease> {
        self.leases.get(&id)
    }

    /// Stores the provided [`Lease`], replacing the one with the same ID.
    pub fn store_lease(&mut self, lease: Lease) -> lease::Id {
        let id = lease.id;
        _ = self.leases.insert(id, lease);
        id
    }

    /// Returns the supplied [`Notification`]s.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Supplies the [`Notification`]s list.
    pub fn set_notifications(&mut self, list: Vec<Notification>) {
        self.notifications = list;
    }

    /// Handles the provided [`Event`].
    ///
    /// # Errors
    ///
    /// If rent payments generation fails.
    pub async fn handle(
        &mut self,
        event: Event,
    ) -> Result<Outcome, Traced<HandlingError>>
    where
        S: Command<
            GeneratePayments,
            Ok = payment::Generation,
            Err = Traced<generate_payments::ExecutionError>,
        >,
    {
        Ok(match event {
            Event::Closed => {
                log::debug!("view closed");
                Outcome::Done
            }
            Event::LeaseCreated(lease) => {
                log::info!("lease `{}` created", lease.id);
                Outcome::LeaseStored(self.store_lease(lease))
            }
            Event::LeaseRenewed(lease) => {
                log::info!(
                    "lease `{}` renewed until {} at {}",
                    lease.id,
                    lease.end_date,
                    lease.monthly_rent,
                );
                Outcome::LeaseStored(self.store_lease(lease))
            }
            Event::ScreeningCompleted(screening) => {
                log::info!(
                    "applicant screened: {} (blacklisted: {})",
                    screening.recommendation,
                    screening.is_blacklisted,
                );
                Outcome::Done
            }
            Event::MarkAsRead(id) => {
                match self.notifications.iter_mut().find(|n| n.id == id) {
                    Some(n) => {
                        n.is_read = true;
                        log::info!("notification `{id}` marked as read");
                    }
                    None => log::warn!("notification `{id}` is unknown"),
                }
                Outcome::Done
            }
            Event::PaymentsRequested(period) => {
                log::info!("rent payments requested for {period}");
                let generation = self
                    .service
                    .execute(GeneratePayments {
                        period,
                        credential: self.credential.clone(),
                    })
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> HandlingError))?;
                log::info!(
                    "{} rent payments generated for {period}",
                    generation.generated,
                );
                Outcome::PaymentsGenerated(generation)
            }
        })
    }
}

/// Error of handling an [`Event`] by a [`Controller`].
#[derive(Debug, Display, Error, From)]
pub enum HandlingError {
    /// Rent payments generation failed.
    #[display("Failed to generate rent payments: {_0}")]
    GeneratePayments(generate_payments::ExecutionError),
}

#[cfg(test)]
mod spec {
    use std::cell::Cell;

    use common::DateTime;
    use service::{
        command::{generate_payments, GeneratePayments},
        domain::{
            lease::{Draft, Status},
            notification, payment, Notification, Period,
        },
        infra::backend::Credential,
        Command,
    };
    use time::UtcOffset;
    use tracerr::Traced;

    use crate::view::{Event, LeaseDetail, LeaseForm, PaymentForm};

    use super::{Controller, HandlingError, Outcome};

    /// Fake service counting generations.
    #[derive(Debug, Default)]
    struct Fake {
        calls: Cell<u32>,
    }

    impl Command<GeneratePayments> for Fake {
        type Ok = payment::Generation;
        type Err = Traced<generate_payments::ExecutionError>;

        async fn execute(
            &self,
            cmd: GeneratePayments,
        ) -> Result<Self::Ok, Self::Err> {
            if cmd.credential.is_none() {
                return Err(tracerr::new!(
                    generate_payments::ExecutionError::Unauthenticated
                ));
            }
            self.calls.set(self.calls.get() + 1);
            Ok(payment::Generation {
                generated: u32::from(u8::from(cmd.period.month)),
            })
        }
    }

    fn now() -> DateTime {
        DateTime::from_rfc3339("2026-03-01T09:00:00Z").unwrap()
    }

    #[tokio::test]
    async fn stores_created_and_renewed_leases() {
        let mut ctrl = Controller::new(Fake::default(), None);

        let mut form = LeaseForm::new();
        form.draft = Draft {
            property_name: "Maple Court 4B".into(),
            tenant_name: "Jordan Reyes".into(),
            start_date: "2026-03-01".into(),
            end_date: "2026-04-01".into(),
            monthly_rent: "1000".into(),
            security_deposit: "1000".into(),
            late_fee_amount: "25".into(),
            ..Draft::default()
        };
        let [created, closed] = form.submit(now()).unwrap();
        let Outcome::LeaseStored(id) = ctrl.handle(created).await.unwrap()
        else {
            panic!("lease is not stored");
        };
        assert_eq!(ctrl.handle(closed).await.unwrap(), Outcome::Done);

        let mut lease = ctrl.lease(id).unwrap().clone();
        lease.status = Status::PendingRenewal;
        _ = ctrl.store_lease(lease.clone());

        let mut detail = LeaseDetail::open(lease);
        detail.open_renewal().unwrap().new_end_date = "2027-04-01".into();
        let mut outcomes = vec![];
        for event in detail.confirm_renewal().unwrap() {
            outcomes.push(ctrl.handle(event).await.unwrap());
        }

        assert_eq!(outcomes, [Outcome::LeaseStored(id), Outcome::Done]);
        let renewed = ctrl.lease(id).unwrap();
        assert_eq!(renewed.status, Status::Active);
        assert_eq!(renewed.end_date.to_string(), "2027-04-01");
    }

    #[tokio::test]
    async fn marks_supplied_notification_as_read() {
        let mut ctrl = Controller::new(Fake::default(), None);
        ctrl.set_notifications(vec![Notification {
            id: "n-1".to_owned().into(),
            title: "Rent due".into(),
            content: String::new(),
            kind: notification::Kind::default(),
            date: now().coerce(),
            is_read: false,
            is_urgent: true,
        }]);

        let outcome = ctrl
            .handle(Event::MarkAsRead("n-1".to_owned().into()))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Done);
        assert!(ctrl.notifications()[0].is_read);
    }

    #[tokio::test]
    async fn generates_payments_with_injected_credential() {
        let mut ctrl =
            Controller::new(Fake::default(), Credential::new("token"));
        let event = PaymentForm::new(now(), UtcOffset::UTC).submit().unwrap();

        let outcome = ctrl.handle(event).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::PaymentsGenerated(payment::Generation { generated: 3 }),
        );
        assert_eq!(ctrl.service().calls.get(), 1);
    }

    #[tokio::test]
    async fn payments_fail_without_credential() {
        let mut ctrl = Controller::new(Fake::default(), None);
        let period = Period::current(now(), UtcOffset::UTC);

        let err = ctrl
            .handle(Event::PaymentsRequested(period))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            HandlingError::GeneratePayments(
                generate_payments::ExecutionError::Unauthenticated
            ),
        ));
        assert_eq!(ctrl.service().calls.get(), 0);
    }
}
