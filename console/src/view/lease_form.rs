//! [`LeaseForm`] view.

use common::DateTime;
use service::domain::{
    lease::{draft, Draft},
    validation::Errors,
};
use tracing as log;

use super::Event;

/// Form creating a new [`Lease`].
///
/// [`Lease`]: service::domain::Lease
#[derive(Clone, Debug, Default)]
pub struct LeaseForm {
    /// Raw input of this [`LeaseForm`].
    pub draft: Draft,

    /// Field [`Errors`] of the last rejected submit.
    errors: Option<Errors<draft::Field>>,
}

impl LeaseForm {
    /// Creates a new empty [`LeaseForm`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns field [`Errors`] of the last rejected submit, if any.
    #[must_use]
    pub fn errors(&self) -> Option<&Errors<draft::Field>> {
        self.errors.as_ref()
    }

    /// Submits this [`LeaseForm`] at the provided [`DateTime`].
    ///
    /// On success the form is reset, and [`Event::LeaseCreated`] is returned
    /// followed by [`Event::Closed`].
    ///
    /// # Errors
    ///
    /// Returns the rejected fields, which are also kept until the next
    /// submit.
    pub fn submit(
        &mut self,
        now: DateTime,
    ) -> Result<[Event; 2], &Errors<draft::Field>> {
        match self.draft.validate() {
            Ok(new) => {
                let lease = new.into_lease(now);
                log::debug!("lease `{}` drafted", lease.id);
                *self = Self::default();
                Ok([Event::LeaseCreated(lease), Event::Closed])
            }
            Err(errors) => {
                log::debug!("lease draft rejected: {errors}");
                Err(self.errors.insert(errors))
            }
        }
    }

    /// Cancels this [`LeaseForm`], discarding its input.
    pub fn cancel(&mut self) -> Event {
        *self = Self::default();
        Event::Closed
    }
}
