//! [`Renewal`] of a [`Lease`].

use common::Date;
use derive_more::Display;
use rust_decimal::Decimal;
use smart_default::SmartDefault;

use crate::domain::validation::{self, Errors};
#[cfg(doc)]
use crate::domain::Lease;

/// New terms a [`Lease`] is renewed on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Renewal {
    /// New end [`Date`] of the [`Lease`].
    ///
    /// Not checked against the [`Lease`] start [`Date`] or today.
    pub end_date: Date,

    /// Amount the monthly rent changes by.
    ///
    /// May be negative, lowering the rent.
    pub rent_increase: Decimal,

    /// Notes on this [`Renewal`].
    pub notes: String,
}

/// Raw input of a [`Renewal`] form.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Draft {
    /// Raw new end [`Date`].
    pub new_end_date: String,

    /// Raw rent increase.
    #[default("0".to_owned())]
    pub rent_increase: String,

    /// Free-text notes.
    pub notes: String,
}

/// Field of a renewal [`Draft`].
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum Field {
    /// [`Draft::new_end_date`].
    #[display("newEndDate")]
    NewEndDate,

    /// [`Draft::rent_increase`].
    #[display("rentIncrease")]
    RentIncrease,
}

impl Draft {
    /// Validates this [`Draft`].
    ///
    /// An empty rent increase counts as zero.
    ///
    /// # Errors
    ///
    /// Returns all the rejected [`Field`]s at once.
    pub fn validate(&self) -> Result<Renewal, Errors<Field>> {
        let mut errors = Errors::default();

        let end_date =
            errors.check(Field::NewEndDate, validation::date(&self.new_end_date));
        let rent_increase = errors.check(
            Field::RentIncrease,
            validation::optional(&self.rent_increase)
                .map_or(Ok(Decimal::ZERO), validation::number),
        );

        errors.into_result(|| {
            Some(Renewal {
                end_date: end_date?,
                rent_increase: rent_increase?,
                notes: self.notes.clone(),
            })
        })
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::domain::validation::Error;

    use super::{Draft, Field};

    #[test]
    fn defaults_to_no_increase() {
        let renewal = Draft {
            new_end_date: "2026-01-01".into(),
            rent_increase: "  ".into(),
            ..Draft::default()
        }
        .validate()
        .unwrap();

        assert_eq!(renewal.rent_increase, Decimal::ZERO);
        assert_eq!(Draft::default().rent_increase, "0");
    }

    #[test]
    fn allows_rent_decrease() {
        let renewal = Draft {
            new_end_date: "2026-01-01".into(),
            rent_increase: "-75.50".into(),
            notes: " market dip ".into(),
        }
        .validate()
        .unwrap();

        assert_eq!(renewal.rent_increase, "-75.50".parse().unwrap());
        assert_eq!(renewal.notes, " market dip ");
    }

    #[test]
    fn rejects_malformed_input_instead_of_nan() {
        let errors = Draft {
            new_end_date: String::new(),
            rent_increase: "a bit".into(),
            notes: String::new(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.get(Field::NewEndDate), Some(Error::Required));
        assert_eq!(errors.get(Field::RentIncrease), Some(Error::InvalidNumber));
    }
}
