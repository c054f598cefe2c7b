//! [`Draft`] of a new [`Lease`].

use std::collections::BTreeSet;

use common::{Date, DateTime, Money};
use derive_more::Display;
use smart_default::SmartDefault;

use crate::domain::{
    validation::{self, Errors},
    Lease,
};

use super::{
    DueDay, Id, Kind, PaymentSchedule, PropertyName, Status, TenantName, Terms,
};

/// Raw input of a new [`Lease`] form.
///
/// Every field is kept exactly as typed, until [`Draft::validate()`] turns
/// it into a [`New`] lease.
#[derive(Clone, Debug, SmartDefault)]
pub struct Draft {
    /// Raw [`PropertyName`].
    pub property_name: String,

    /// Raw [`TenantName`].
    pub tenant_name: String,

    /// Raw start [`Date`].
    pub start_date: String,

    /// Raw end [`Date`].
    pub end_date: String,

    /// Raw monthly rent amount.
    pub monthly_rent: String,

    /// Raw security deposit amount.
    pub security_deposit: String,

    /// [`Kind`] of the new [`Lease`].
    #[default(Kind::FixedTerm)]
    pub kind: Kind,

    /// Indicator whether pets are allowed.
    pub pets_allowed: bool,

    /// Raw pet deposit amount, optional.
    pub pet_deposit: String,

    /// Raw number of parking spaces, optional.
    pub parking_spaces: String,

    /// Included utilities.
    pub utilities: BTreeSet<String>,

    /// Raw [`DueDay`].
    #[default("1".to_owned())]
    pub due_day: String,

    /// Raw late fee amount.
    pub late_fee_amount: String,

    /// Raw number of days after which the late fee is charged.
    #[default("5".to_owned())]
    pub late_fee_after: String,
}

/// Field of a [`Draft`].
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum Field {
    /// [`Draft::property_name`].
    #[display("propertyName")]
    PropertyName,

    /// [`Draft::tenant_name`].
    #[display("tenantName")]
    TenantName,

    /// [`Draft::start_date`].
    #[display("startDate")]
    StartDate,

    /// [`Draft::end_date`].
    #[display("endDate")]
    EndDate,

    /// [`Draft::monthly_rent`].
    #[display("monthlyRent")]
    MonthlyRent,

    /// [`Draft::security_deposit`].
    #[display("securityDeposit")]
    SecurityDeposit,

    /// [`Draft::pet_deposit`].
    #[display("petDeposit")]
    PetDeposit,

    /// [`Draft::parking_spaces`].
    #[display("parkingSpaces")]
    ParkingSpaces,

    /// [`Draft::due_day`].
    #[display("dueDate")]
    DueDay,

    /// [`Draft::late_fee_amount`].
    #[display("lateFeeAmount")]
    LateFeeAmount,

    /// [`Draft::late_fee_after`].
    #[display("lateFeeAfter")]
    LateFeeAfter,
}

/// Validated content of a [`Draft`], lacking only what is assigned on
/// creation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct New {
    /// [`PropertyName`] of the new [`Lease`].
    pub property_name: PropertyName,

    /// [`TenantName`] of the new [`Lease`].
    pub tenant_name: TenantName,

    /// Start [`Date`] of the new [`Lease`].
    pub start_date: Date,

    /// End [`Date`] of the new [`Lease`].
    pub end_date: Date,

    /// Monthly rent of the new [`Lease`].
    pub monthly_rent: Money,

    /// Security deposit of the new [`Lease`].
    pub security_deposit: Money,

    /// [`Kind`] of the new [`Lease`].
    pub kind: Kind,

    /// [`Terms`] of the new [`Lease`].
    pub terms: Terms,

    /// [`PaymentSchedule`] of the new [`Lease`].
    pub payment_schedule: PaymentSchedule,
}

impl Draft {
    /// Validates this [`Draft`].
    ///
    /// Only the presence and well-formedness of each field is checked, no
    /// cross-field rules (like the end [`Date`] following the start one)
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns all the rejected [`Field`]s at once.
    pub fn validate(&self) -> Result<New, Errors<Field>> {
        use validation::Error as E;
        use Field as F;

        let mut errors = Errors::default();

        let property_name = errors.check(
            F::PropertyName,
            validation::required(&self.property_name)
                .and_then(|s| PropertyName::new(s).ok_or(E::InvalidFormat)),
        );
        let tenant_name = errors.check(
            F::TenantName,
            validation::required(&self.tenant_name)
                .and_then(|s| TenantName::new(s).ok_or(E::InvalidFormat)),
        );
        let start_date =
            errors.check(F::StartDate, validation::date(&self.start_date));
        let end_date = errors.check(F::EndDate, validation::date(&self.end_date));
        let monthly_rent =
            errors.check(F::MonthlyRent, validation::amount(&self.monthly_rent));
        let security_deposit = errors.check(
            F::SecurityDeposit,
            validation::amount(&self.security_deposit),
        );
        let pet_deposit = errors.check(
            F::PetDeposit,
            validation::optional(&self.pet_deposit)
                .map(validation::amount)
                .transpose(),
        );
        let parking_spaces = errors.check(
            F::ParkingSpaces,
            validation::optional(&self.parking_spaces)
                .map_or(Ok(0), |s| s.parse::<u16>().map_err(|_| E::InvalidNumber)),
        );
        let due_day = errors.check(
            F::DueDay,
            validation::parse::<u8>(&self.due_day, E::InvalidNumber)
                .and_then(|d| DueDay::new(d).ok_or(E::OutOfRange)),
        );
        let late_fee_amount = errors.check(
            F::LateFeeAmount,
            validation::amount(&self.late_fee_amount),
        );
        let late_fee_after = errors.check(
            F::LateFeeAfter,
            validation::parse::<u16>(&self.late_fee_after, E::InvalidNumber),
        );

        errors.into_result(|| {
            Some(New {
                property_name: property_name?,
                tenant_name: tenant_name?,
                start_date: start_date?,
                end_date: end_date?,
                monthly_rent: monthly_rent?,
                security_deposit: security_deposit?,
                kind: self.kind,
                terms: Terms {
                    pets_allowed: self.pets_allowed,
                    pet_deposit: pet_deposit?,
                    parking_spaces: parking_spaces?,
                    utilities: self
                        .utilities
                        .iter()
                        .map(|u| u.trim())
                        .filter(|u| !u.is_empty())
                        .map(ToOwned::to_owned)
                        .collect(),
                },
                payment_schedule: PaymentSchedule {
                    due_day: due_day?,
                    late_fee_amount: late_fee_amount?,
                    late_fee_after: late_fee_after?,
                },
            })
        })
    }
}

impl New {
    /// Creates an [`Active`] [`Lease`] out of this [`New`] one at the
    /// provided [`DateTime`], with no documents attached.
    ///
    /// [`Active`]: Status::Active
    #[must_use]
    pub fn into_lease(self, at: DateTime) -> Lease {
        let Self {
            property_name,
            tenant_name,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            kind,
            terms,
            payment_schedule,
        } = self;

        Lease {
            id: Id::generate(at),
            property_name,
            tenant_name,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            kind,
            status: Status::Active,
            terms,
            payment_schedule,
            documents: Vec::new(),
            renewal_notes: None,
        }
    }
}
