//! [`LeaseDetail`] view and its renewal sub-form.

use std::fmt;

use common::DateTime;
use derive_more::{Display, Error, From};
use service::domain::{
    lease::{renewal, Status},
    validation::Errors,
    Lease,
};
use tracing as log;

use super::Event;

/// Viewer of a single [`Lease`], offering its renewal.
///
/// Invisible while no [`Lease`] is opened.
#[derive(Clone, Debug, Default)]
pub struct LeaseDetail {
    /// Opened [`Lease`], if any.
    lease: Option<Lease>,

    /// Renewal sub-form, if opened.
    renewal: Option<renewal::Draft>,
}

impl LeaseDetail {
    /// Opens the provided [`Lease`] in a new [`LeaseDetail`].
    #[must_use]
    pub fn open(lease: Lease) -> Self {
        Self {
            lease: Some(lease),
            renewal: None,
        }
    }

    /// Returns the opened [`Lease`], if this [`LeaseDetail`] is visible.
    #[must_use]
    pub fn lease(&self) -> Option<&Lease> {
        self.lease.as_ref()
    }

    /// Indicates whether this [`LeaseDetail`] is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lease.is_some()
    }

    /// Returns [`DaysRemaining`] until the opened [`Lease`] ends.
    #[must_use]
    pub fn days_remaining(&self, now: DateTime) -> Option<DaysRemaining> {
        self.lease
            .as_ref()
            .map(|l| DaysRemaining(l.days_remaining(now)))
    }

    /// Returns the [`Banner`] tone of the opened [`Lease`].
    #[must_use]
    pub fn banner(&self) -> Option<Banner> {
        self.lease.as_ref().map(|l| {
            if l.is_pending_renewal() {
                Banner::RenewalDue
            } else {
                Banner::Informational
            }
        })
    }

    /// Indicates whether the "Process Renewal" action is offered.
    #[must_use]
    pub fn can_process_renewal(&self) -> bool {
        self.lease.as_ref().is_some_and(Lease::is_pending_renewal)
            && self.renewal.is_none()
    }

    /// Opens the renewal sub-form.
    ///
    /// # Errors
    ///
    /// If no [`Lease`] is opened, or it doesn't await a renewal.
    pub fn open_renewal(
        &mut self,
    ) -> Result<&mut renewal::Draft, RenewalError> {
        let lease = self.lease.as_ref().ok_or(RenewalError::NotOpen)?;
        if lease.status != Status::PendingRenewal {
            return Err(RenewalError::NotPending(lease.status));
        }
        Ok(self.renewal.get_or_insert_with(renewal::Draft::default))
    }

    /// Returns the opened renewal sub-form, if any.
    pub fn renewal_mut(&mut self) -> Option<&mut renewal::Draft> {
        self.renewal.as_mut()
    }

    /// Cancels the renewal sub-form, discarding its draft and leaving the
    /// [`Lease`] untouched.
    pub fn cancel_renewal(&mut self) {
        self.renewal = None;
    }

    /// Confirms the renewal sub-form.
    ///
    /// On success this [`LeaseDetail`] closes, returning
    /// [`Event::LeaseRenewed`] followed by [`Event::Closed`].
    ///
    /// # Errors
    ///
    /// If no renewal is in progress, its draft is rejected, or the adjusted
    /// rent overflows. The sub-form stays open in all these cases.
    pub fn confirm_renewal(&mut self) -> Result<[Event; 2], RenewalError> {
        let (Some(lease), Some(draft)) = (&self.lease, &self.renewal) else {
            return Err(RenewalError::NotOpen);
        };
        let renewed = lease
            .renewed(draft.validate()?)
            .ok_or(RenewalError::RentOverflow)?;

        log::debug!(
            "lease `{}` renewed until {}",
            renewed.id,
            renewed.end_date,
        );

        *self = Self::default();
        Ok([Event::LeaseRenewed(renewed), Event::Closed])
    }

    /// Closes this [`LeaseDetail`].
    ///
    /// [`None`] is returned if it's not open already.
    pub fn close(&mut self) -> Option<Event> {
        _ = self.lease.take()?;
        self.renewal = None;
        Some(Event::Closed)
    }
}

/// Number of calendar days until a [`Lease`] ends.
///
/// Never clamped, so an overdue [`Lease`] renders a negative number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DaysRemaining(pub i64);

impl DaysRemaining {
    /// Indicates whether the [`Lease`] has already ended.
    #[must_use]
    pub fn is_overdue(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for DaysRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "1 day remaining"),
            n => write!(f, "{n} days remaining"),
        }
    }
}

/// Tone of a [`LeaseDetail`] banner.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Banner {
    /// [`Lease`] awaits a renewal.
    #[display("Renewal due")]
    RenewalDue,

    /// Nothing requires attention.
    #[display("Lease details")]
    Informational,
}

/// Error of a [`LeaseDetail`] renewal.
#[derive(Clone, Debug, Display, Error, From)]
pub enum RenewalError {
    /// No [`Lease`] or renewal sub-form is opened.
    #[display("No renewal is in progress")]
    #[from(ignore)]
    NotOpen,

    /// [`Lease`] doesn't await a renewal.
    #[display("`{_0}` lease cannot be renewed")]
    #[from(ignore)]
    NotPending(#[error(not(source))] Status),

    /// Renewal draft is rejected.
    #[display("Invalid renewal: {_0}")]
    Invalid(Errors<renewal::Field>),

    /// Adjusted rent overflows.
    #[display("Adjusted rent is out of range")]
    #[from(ignore)]
    RentOverflow,
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::DateTime;
    use service::domain::{
        lease::{Draft, Kind, Status},
        Lease,
    };

    use super::{Banner, DaysRemaining, Event, LeaseDetail, RenewalError};

    fn lease(status: Status) -> Lease {
        let mut lease = Draft {
            property_name: "Maple Court 4B".into(),
            tenant_name: "Jordan Reyes".into(),
            start_date: "2025-01-01".into(),
            end_date: "2025-12-31".into(),
            monthly_rent: "1000".into(),
            security_deposit: "2000".into(),
            late_fee_amount: "50".into(),
            utilities: BTreeSet::from(["Water".to_owned()]),
            ..Draft::default()
        }
        .validate()
        .unwrap()
        .into_lease(DateTime::from_rfc3339("2025-01-01T00:00:00Z").unwrap());
        lease.status = status;
        lease
    }

    #[test]
    fn days_remaining_is_unclamped() {
        let detail = LeaseDetail::open(lease(Status::Active));

        let now = DateTime::from_rfc3339("2025-12-21T00:00:00Z").unwrap();
        let days = detail.days_remaining(now).unwrap();
        assert_eq!(days.to_string(), "10 days remaining");
        assert!(!days.is_overdue());

        let now = DateTime::from_rfc3339("2026-01-03T12:00:00Z").unwrap();
        let days = detail.days_remaining(now).unwrap();
        assert_eq!(days, DaysRemaining(-3));
        assert_eq!(days.to_string(), "-3 days remaining");
        assert!(days.is_overdue());

        assert_eq!(LeaseDetail::default().days_remaining(now), None);
    }

    #[test]
    fn renewal_depends_on_status_only() {
        let mut detail = LeaseDetail::open(lease(Status::Active));
        assert_eq!(detail.banner(), Some(Banner::Informational));
        assert!(!detail.can_process_renewal());
        assert!(matches!(
            detail.open_renewal(),
            Err(RenewalError::NotPending(Status::Active)),
        ));

        let mut detail = LeaseDetail::open(lease(Status::PendingRenewal));
        assert_eq!(detail.banner(), Some(Banner::RenewalDue));
        assert!(detail.can_process_renewal());
        assert!(detail.open_renewal().is_ok());
        assert!(!detail.can_process_renewal());
    }

    #[test]
    fn confirm_emits_renewed_lease_and_closes_once() {
        let original = lease(Status::PendingRenewal);
        let mut detail = LeaseDetail::open(original.clone());

        let draft = detail.open_renewal().unwrap();
        draft.new_end_date = "2026-01-01".into();
        draft.rent_increase = "150".into();
        draft.notes = "  line one\n".into();

        let events = detail.confirm_renewal().unwrap();

        let [Event::LeaseRenewed(renewed), Event::Closed] = events else {
            panic!("unexpected events: {events:?}");
        };
        assert_eq!(renewed.monthly_rent, "1150".parse().unwrap());
        assert_eq!(renewed.end_date.to_string(), "2026-01-01");
        assert_eq!(renewed.status, Status::Active);
        assert_eq!(renewed.renewal_notes.as_deref(), Some("  line one\n"));
        assert_eq!(renewed.id, original.id);
        assert_eq!(renewed.kind, Kind::FixedTerm);
        assert_eq!(renewed.terms, original.terms);
        assert_eq!(renewed.payment_schedule, original.payment_schedule);

        assert!(!detail.is_open());
        assert!(matches!(
            detail.confirm_renewal(),
            Err(RenewalError::NotOpen),
        ));
        assert_eq!(detail.close(), None);
    }

    #[test]
    fn malformed_renewal_emits_nothing() {
        let mut detail = LeaseDetail::open(lease(Status::PendingRenewal));

        let draft = detail.open_renewal().unwrap();
        draft.new_end_date = "2026-01-01".into();
        draft.rent_increase = "a lot".into();

        assert!(matches!(
            detail.confirm_renewal(),
            Err(RenewalError::Invalid(_)),
        ));
        assert!(detail.is_open());
        assert_eq!(detail.renewal_mut().unwrap().rent_increase, "a lot");
    }

    #[test]
    fn cancel_discards_draft_only() {
        let original = lease(Status::PendingRenewal);
        let mut detail = LeaseDetail::open(original.clone());

        detail.open_renewal().unwrap().notes = "draft".into();
        detail.cancel_renewal();

        assert!(detail.renewal_mut().is_none());
        assert_eq!(detail.lease(), Some(&original));
        assert_eq!(detail.open_renewal().unwrap().notes, "");
        assert_eq!(detail.close(), Some(Event::Closed));
        assert!(!detail.is_open());
    }
}
