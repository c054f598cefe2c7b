//! [`PaymentForm`] view.

use std::ops::RangeInclusive;

use common::DateTime;
use service::domain::{payment::Month, Period};
use time::UtcOffset;

use super::Event;

/// Label of the submit button while idle.
pub const IDLE_LABEL: &str = "Generate Payments";

/// Label of the submit button while processing.
pub const BUSY_LABEL: &str = "Generating...";

/// Form requesting rent payments generation for a [`Period`].
#[derive(Clone, Copy, Debug)]
pub struct PaymentForm {
    /// Selected [`Period`].
    period: Period,

    /// Indicator whether a generation is being processed.
    processing: bool,
}

impl PaymentForm {
    /// Creates a new [`PaymentForm`] defaulting to the [`Period`] of the
    /// provided [`DateTime`] in the local [`UtcOffset`].
    #[must_use]
    pub fn new(now: DateTime, offset: UtcOffset) -> Self {
        Self {
            period: Period::current(now, offset),
            processing: false,
        }
    }

    /// Returns the selected [`Period`].
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns the range of years suggested for selection.
    #[must_use]
    pub fn year_hint(&self) -> RangeInclusive<i32> {
        Period::YEAR_HINT
    }

    /// Selects the provided `month`.
    ///
    /// Returns `false` if the `month` is not within `1..=12`, or the form is
    /// processing.
    pub fn set_month(&mut self, month: u8) -> bool {
        match Month::new(month) {
            Some(month) if !self.processing => {
                self.period.month = month;
                true
            }
            Some(_) | None => false,
        }
    }

    /// Selects the provided `year`, which is not bounded by the
    /// [`PaymentForm::year_hint()`].
    ///
    /// Returns `false` if the form is processing.
    pub fn set_year(&mut self, year: i32) -> bool {
        if self.processing {
            return false;
        }
        self.period.year = year;
        true
    }

    /// Indicates whether this [`PaymentForm`] is processing a generation,
    /// having every control disabled.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Marks this [`PaymentForm`] as processing a generation or not.
    pub fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    /// Returns the label of the submit button.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.processing {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    /// Submits this [`PaymentForm`].
    ///
    /// [`None`] is returned while processing.
    #[must_use]
    pub fn submit(&self) -> Option<Event> {
        (!self.processing).then_some(Event::PaymentsRequested(self.period))
    }
}
