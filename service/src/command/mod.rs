//! [`Command`] definition.

pub mod generate_payments;
pub mod screen_applicant;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    generate_payments::GeneratePayments, screen_applicant::ScreenApplicant,
};
