//! [`ScreeningPanel`] view.

use std::future::Future;

use futures::{
    future::{AbortHandle, Abortable, Aborted},
    FutureExt as _,
};
use service::{
    command::{screen_applicant, ScreenApplicant},
    domain::{screening::Email, Screening},
    infra::backend::Credential,
    Command,
};
use tracerr::Traced;
use tracing as log;

use super::Event;

/// Label of the trigger while idle.
pub const IDLE_LABEL: &str = "Screen Applicant";

/// Label of the trigger while a screening is in flight.
pub const BUSY_LABEL: &str = "Screening...";

/// Panel screening a rental applicant by its email.
///
/// Every triggered screening takes a new generation number, and only the
/// response of the latest one is applied. Changing the email or dropping the
/// panel aborts the in-flight screening.
#[derive(Debug, Default)]
pub struct ScreeningPanel {
    /// Raw email of the applicant.
    email: String,

    /// Generation of the latest triggered screening.
    generation: u64,

    /// [`AbortHandle`] of the in-flight screening, if any.
    in_flight: Option<AbortHandle>,

    /// Latest successful [`Screening`].
    result: Option<Screening>,

    /// Message of the latest failure.
    failure: Option<String>,
}

/// Outcome of a screening triggered by a [`ScreeningPanel`].
#[derive(Debug)]
pub struct Response {
    /// Generation the screening was triggered with.
    generation: u64,

    /// Result of the screening, unless it was aborted.
    result: Result<
        Result<Screening, Traced<screen_applicant::ExecutionError>>,
        Aborted,
    >,
}

impl ScreeningPanel {
    /// Creates a new [`ScreeningPanel`] for the provided applicant email.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            generation: 0,
            in_flight: None,
            result: None,
            failure: None,
        }
    }

    /// Returns the raw applicant email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Changes the applicant email, aborting the in-flight screening.
    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        if email != self.email {
            self.abort();
            self.email = email;
        }
    }

    /// Indicates whether a screening is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Indicates whether the trigger is enabled.
    #[must_use]
    pub fn can_trigger(&self) -> bool {
        !self.email.trim().is_empty() && !self.is_busy()
    }

    /// Returns the label of the trigger.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    /// Returns the latest successful [`Screening`], if any.
    #[must_use]
    pub fn result(&self) -> Option<&Screening> {
        self.result.as_ref()
    }

    /// Returns the message of the latest failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Triggers a new screening via the provided `service`.
    ///
    /// Returns the screening to be awaited and then passed to
    /// [`ScreeningPanel::complete()`], or [`None`] if the trigger is
    /// disabled or the email is malformed.
    pub fn trigger<'s, S>(
        &mut self,
        service: &'s S,
        credential: Option<Credential>,
    ) -> Option<impl Future<Output = Response> + 's>
    where
        S: Command<
            ScreenApplicant,
            Ok = Screening,
            Err = Traced<screen_applicant::ExecutionError>,
        >,
    {
        if !self.can_trigger() {
            return None;
        }
        let Some(email) = Email::new(&self.email) else {
            self.failure =
                Some(format!("`{}` is not a valid email", self.email));
            return None;
        };

        self.generation += 1;
        let generation = self.generation;
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);
        self.failure = None;

        log::debug!("screening #{generation} of `{email}` triggered");

        let screening = service.execute(ScreenApplicant { email, credential });
        Some(
            Abortable::new(screening, registration)
                .map(move |result| Response { generation, result }),
        )
    }

    /// Applies the provided [`Response`] of a triggered screening.
    ///
    /// Responses of aborted or superseded screenings are ignored. A failure
    /// keeps the previous [`Screening`] untouched.
    pub fn complete(&mut self, response: Response) -> Option<Event> {
        let Response { generation, result } = response;
        if generation != self.generation {
            log::debug!("stale screening #{generation} ignored");
            return None;
        }
        let Ok(result) = result else {
            log::debug!("screening #{generation} aborted");
            return None;
        };
        self.in_flight = None;

        match result {
            Ok(screening) => {
                self.result = Some(screening.clone());
                self.failure = None;
                Some(Event::ScreeningCompleted(screening))
            }
            Err(e) => {
                log::error!("failed to screen applicant: {e}");
                self.failure = Some(e.as_ref().to_string());
                None
            }
        }
    }

    /// Aborts the in-flight screening, if any.
    fn abort(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
            self.generation += 1;
        }
    }
}

impl Drop for ScreeningPanel {
    fn drop(&mut self) {
        self.abort();
    }
}
