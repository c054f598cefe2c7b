//! Domain definitions.

pub mod lease;
pub mod notification;
pub mod payment;
pub mod screening;
pub mod validation;

pub use self::{
    lease::Lease, notification::Notification, payment::Period,
    screening::Screening,
};
