//! Recurring rent payment definitions.

use std::ops::RangeInclusive;

use common::DateTime;
use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};
use time::UtcOffset;

/// Month and year rent payments are generated for.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[display("{:02}/{year}", month.0)]
pub struct Period {
    /// [`Month`] of this [`Period`].
    pub month: Month,

    /// Year of this [`Period`].
    pub year: i32,
}

impl Period {
    /// Years suggested for a [`Period`].
    ///
    /// Only a hint, other years are accepted too.
    pub const YEAR_HINT: RangeInclusive<i32> = 2020..=2030;

    /// Returns the [`Period`] containing the provided [`DateTime`] in the
    /// provided local [`UtcOffset`].
    #[must_use]
    pub fn current(now: DateTime, offset: UtcOffset) -> Self {
        let today = now.to_local(offset).date();
        Self {
            month: Month(today.month().into()),
            year: today.year(),
        }
    }

    /// Indicates whether the year of this [`Period`] is within the
    /// [`Period::YEAR_HINT`].
    #[must_use]
    pub fn is_year_hinted(&self) -> bool {
        Self::YEAR_HINT.contains(&self.year)
    }
}

/// Month of a year (`1..=12`).
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Month(u8);

impl Month {
    /// Creates a new [`Month`] if the given `month` is within `1..=12`.
    #[must_use]
    pub fn new(month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let month = u8::deserialize(deserializer)?;
        Self::new(month).ok_or_else(|| D::Error::custom("invalid `Month`"))
    }
}

/// Outcome of a bulk rent payments generation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Generation {
    /// Number of generated payments.
    pub generated: u32,
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use serde_json::json;

    use time::UtcOffset;

    use super::{Month, Period};

    #[test]
    fn current_period() {
        let now = DateTime::from_rfc3339("2026-10-19T23:30:00Z").unwrap();
        let period = Period::current(now, UtcOffset::UTC);

        assert_eq!(u8::from(period.month), 10);
        assert_eq!(period.year, 2026);
        assert!(period.is_year_hinted());
        assert_eq!(period.to_string(), "10/2026");
    }

    #[test]
    fn current_period_is_local() {
        let now = DateTime::from_rfc3339("2027-01-01T03:00:00Z").unwrap();

        let west = UtcOffset::from_hms(-7, 0, 0).unwrap();
        assert_eq!(Period::current(now, west).to_string(), "12/2026");
        assert_eq!(Period::current(now, UtcOffset::UTC).to_string(), "01/2027");
    }

    #[test]
    fn month_is_bounded_and_year_is_not() {
        assert!(Month::new(0).is_none());
        assert!(Month::new(13).is_none());
        assert!(serde_json::from_value::<Period>(
            json!({"month": 13, "year": 2026}),
        )
        .is_err());

        let far: Period =
            serde_json::from_value(json!({"month": 2, "year": 2042})).unwrap();
        assert!(!far.is_year_hinted());
        assert_eq!(
            serde_json::to_value(far).unwrap(),
            json!({"month": 2, "year": 2042}),
        );
    }
}
