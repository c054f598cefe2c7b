//! Field-level validation of raw form input.

use std::{collections::BTreeMap, fmt, str::FromStr};

use common::{money::Currency, Date, Money};
use derive_more::Display;
use itertools::Itertools as _;
use rust_decimal::Decimal;

/// Reason a single form field was rejected.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Error {
    /// The field is required, but left empty.
    #[display("is required")]
    Required,

    /// The field doesn't contain a valid number.
    #[display("must be a number")]
    InvalidNumber,

    /// The field doesn't contain a valid `YYYY-MM-DD` date.
    #[display("must be a `YYYY-MM-DD` date")]
    InvalidDate,

    /// The field holds a value outside of its allowed range.
    #[display("is out of range")]
    OutOfRange,

    /// The field holds a value of an invalid format.
    #[display("has invalid format")]
    InvalidFormat,
}

/// Set of field-level [`Error`]s keyed by the field `F`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Errors<F: Ord> {
    /// Rejected fields and their reasons.
    fields: BTreeMap<F, Error>,
}

impl<F: Ord> Default for Errors<F> {
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> Errors<F> {
    /// Records the provided [`Error`] of the `field`.
    ///
    /// The first recorded [`Error`] of a field wins.
    pub fn add(&mut self, field: F, error: Error) {
        _ = self.fields.entry(field).or_insert(error);
    }

    /// Returns the [`Error`] of the provided `field`, if any.
    #[must_use]
    pub fn get(&self, field: F) -> Option<Error> {
        self.fields.get(&field).copied()
    }

    /// Returns whether no field has been rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the rejected fields in their order.
    pub fn iter(&self) -> impl Iterator<Item = (F, Error)> + '_ {
        self.fields.iter().map(|(f, e)| (*f, *e))
    }

    /// Unwraps the `value` collected by a field check, recording its
    /// [`Error`] on failure.
    pub fn check<T>(&mut self, field: F, value: Result<T, Error>) -> Option<T> {
        value.map_err(|e| self.add(field, e)).ok()
    }

    /// Converts these [`Errors`] into a [`Result`], succeeding with the
    /// provided `value` only if no field has been rejected.
    ///
    /// # Errors
    ///
    /// Returns these [`Errors`] if any field has been rejected.
    pub fn into_result<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        value().ok_or(self)
    }
}

impl<F: Ord + fmt::Display> fmt::Display for Errors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.fields
                .iter()
                .format_with("; ", |(field, e), f| f(&format_args!("`{field}` {e}"))),
        )
    }
}

impl<F: Ord + fmt::Debug + fmt::Display> std::error::Error for Errors<F> {}

/// Returns the trimmed `raw` input, failing if it's empty.
///
/// # Errors
///
/// [`Error::Required`] if the `raw` input is blank.
pub fn required(raw: &str) -> Result<&str, Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        Err(Error::Required)
    } else {
        Ok(raw)
    }
}

/// Returns the trimmed `raw` input, or [`None`] if it's blank.
#[must_use]
pub fn optional(raw: &str) -> Option<&str> {
    required(raw).ok()
}

/// Parses the required `raw` input as `T`, reporting a parsing failure as
/// the provided `invalid` [`Error`].
///
/// # Errors
///
/// [`Error::Required`] if the `raw` input is blank, or `invalid` if it
/// cannot be parsed.
pub fn parse<T: FromStr>(raw: &str, invalid: Error) -> Result<T, Error> {
    required(raw)?.parse().map_err(|_| invalid)
}

/// Parses the required `raw` input as a [`Decimal`] number.
///
/// # Errors
///
/// [`Error::Required`] if the `raw` input is blank, or
/// [`Error::InvalidNumber`] if it's not a number.
pub fn number(raw: &str) -> Result<Decimal, Error> {
    parse(raw, Error::InvalidNumber)
}

/// Parses the required `raw` input as a [`Money`] amount in US dollars,
/// rejecting negative amounts.
///
/// # Errors
///
/// [`Error::Required`] if the `raw` input is blank,
/// [`Error::InvalidNumber`] if it's not a number, [`Error::InvalidFormat`]
/// if it's not in US dollars, or [`Error::OutOfRange`] if it's negative.
pub fn amount(raw: &str) -> Result<Money, Error> {
    let money: Money = parse(raw, Error::InvalidNumber)?;
    if money.currency != Currency::Usd {
        return Err(Error::InvalidFormat);
    }
    if money.amount.is_sign_negative() {
        return Err(Error::OutOfRange);
    }
    Ok(money)
}

/// Parses the required `raw` input as a [`Date`].
///
/// # Errors
///
/// [`Error::Required`] if the `raw` input is blank, or
/// [`Error::InvalidDate`] if it's not a `YYYY-MM-DD` date.
pub fn date(raw: &str) -> Result<Date, Error> {
    parse(raw, Error::InvalidDate)
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{amount, date, number, required, Error, Errors};

    #[test]
    fn checks_raw_input() {
        assert_eq!(required("  "), Err(Error::Required));
        assert_eq!(required(" Elm St "), Ok("Elm St"));

        assert_eq!(number("150"), Ok(Decimal::from(150)));
        assert_eq!(number("-150"), Ok(Decimal::from(-150)));
        assert_eq!(number("abc"), Err(Error::InvalidNumber));
        assert_eq!(number("NaN"), Err(Error::InvalidNumber));
        assert_eq!(number(""), Err(Error::Required));

        assert_eq!(amount("-1"), Err(Error::OutOfRange));
        assert!(amount("1200.50").is_ok());
        assert!(amount("$1200").is_ok());
        assert!(amount("1200USD").is_ok());
        assert_eq!(amount("1200EUR"), Err(Error::InvalidFormat));

        assert_eq!(date("2026-02-30"), Err(Error::InvalidDate));
        assert!(date("2026-01-01").is_ok());
    }

    #[test]
    fn keeps_first_error_per_field() {
        let mut errors = Errors::default();
        errors.add("rent", Error::Required);
        errors.add("rent", Error::InvalidNumber);
        errors.add("end", Error::InvalidDate);

        assert_eq!(errors.get("rent"), Some(Error::Required));
        assert_eq!(
            errors.to_string(),
            "`end` must be a `YYYY-MM-DD` date; `rent` is required",
        );
        assert_eq!(errors.into_result(|| Some(())), Err({
            let mut e = Errors::default();
            e.add("rent", Error::Required);
            e.add("end", Error::InvalidDate);
            e
        }));
    }
}
