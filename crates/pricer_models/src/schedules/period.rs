//! Calculation periods consumed by the observation schedule generator.

use pricer_core::types::time::Date;
use std::fmt;

/// Anything that exposes the end date of a calculation period.
///
/// Cashflow and scheduling components pass their own period type; the
/// observation generator only ever needs the end date.
pub trait CalculationPeriod {
    /// Returns the last day of the period.
    fn end_date(&self) -> Date;
}

impl CalculationPeriod for Date {
    fn end_date(&self) -> Date {
        *self
    }
}

impl<P: CalculationPeriod + ?Sized> CalculationPeriod for &P {
    fn end_date(&self) -> Date {
        (**self).end_date()
    }
}

/// A single calculation period with start, end, and payment dates.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{CalculationPeriod, Period};
/// use pricer_core::types::time::Date;
///
/// let period = Period::new(
///     Date::from_ymd(2020, 1, 1).unwrap(),
///     Date::from_ymd(2020, 6, 1).unwrap(),
///     Date::from_ymd(2020, 6, 3).unwrap(), // Payment 2 days after end
/// );
///
/// assert_eq!(period.end_date(), Date::from_ymd(2020, 6, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Start date of the period.
    start: Date,
    /// End date of the period.
    end: Date,
    /// Payment date (may differ from end date due to settlement lag).
    payment: Date,
}

impl Period {
    /// Creates a new period with the specified dates.
    #[inline]
    pub fn new(start: Date, end: Date, payment: Date) -> Self {
        Self {
            start,
            end,
            payment,
        }
    }

    /// Creates a new period where payment date equals end date.
    #[inline]
    pub fn with_payment_on_end(start: Date, end: Date) -> Self {
        Self::new(start, end, end)
    }
}

impl CalculationPeriod for Period {
    fn end_date(&self) -> Date {
        self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Period({} to {}, pay {})",
            self.start, self.end, self.payment
        )
    }
}
