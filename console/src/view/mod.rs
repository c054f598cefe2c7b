//! View state holders.
//!
//! Every view owns its state exclusively and reports results upward only
//! through the [`Event`]s it returns to the owning [`Controller`].
//!
//! [`Controller`]: crate::Controller

pub mod lease_detail;
pub mod lease_form;
pub mod notifications;
pub mod payment_form;
pub mod screening_panel;

use service::domain::{notification, Lease, Period, Screening};

pub use self::{
    lease_detail::LeaseDetail, lease_form::LeaseForm,
    notifications::Notifications, payment_form::PaymentForm,
    screening_panel::ScreeningPanel,
};

/// Event reported by a view to its owning [`Controller`].
///
/// [`Controller`]: crate::Controller
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// View has been closed.
    Closed,

    /// New [`Lease`] has been created.
    LeaseCreated(Lease),

    /// [`Lease`] has been renewed.
    LeaseRenewed(Lease),

    /// Applicant has been screened.
    ScreeningCompleted(Screening),

    /// [`Notification`] is requested to be marked as read.
    ///
    /// [`Notification`]: service::domain::Notification
    MarkAsRead(notification::Id),

    /// Rent payments are requested to be generated for a [`Period`].
    PaymentsRequested(Period),
}
