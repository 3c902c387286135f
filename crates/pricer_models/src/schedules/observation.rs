//! Barrier observation date generation.
//!
//! Observation density increases towards the end of the reference window.
//! Dates are selected with a modular filter on serial day numbers, anchored
//! so that the window end itself always falls on the fine grid:
//!
//! - within `fine_horizon` days of the end: every `fine_period` days
//! - within `medium_horizon` days of the end: serial ≡ anchor (mod `medium_period`)
//! - earlier: serial ≡ anchor (mod `coarse_period`)
//!
//! where `anchor = end mod fine_period`. The window start is always the
//! first observation.

use super::period::CalculationPeriod;
use super::sampling::SamplingConfig;
use pricer_core::types::time::Date;

/// Returns the observation dates for the reference window `[start, end]`.
///
/// The result is ordered, free of duplicates, bounded by the window,
/// starts with `start` and ends with `end`. An inverted window yields
/// no dates.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{observation_dates, SamplingConfig};
/// use pricer_core::types::time::Date;
///
/// let start = Date::from_ymd(2020, 1, 1).unwrap();
/// let end = Date::from_ymd(2020, 6, 1).unwrap();
/// let dates = observation_dates(start, end, &SamplingConfig::default());
///
/// assert_eq!(dates.first(), Some(&start));
/// assert_eq!(dates.last(), Some(&end));
/// ```
pub fn observation_dates(start: Date, end: Date, sampling: &SamplingConfig) -> Vec<Date> {
    if start > end {
        return Vec::new();
    }

    let fine = i64::from(sampling.fine_period());
    let medium = i64::from(sampling.medium_period());
    let coarse = i64::from(sampling.coarse_period());

    let end_serial = end.serial();
    let fine_from = end_serial - i64::from(sampling.fine_horizon());
    let medium_from = end_serial - i64::from(sampling.medium_horizon());
    let anchor = end_serial.rem_euclid(fine);

    let selected = |i: i64| {
        (i >= fine_from && i.rem_euclid(fine) == anchor)
            || (i >= medium_from && i.rem_euclid(medium) == anchor)
            || i.rem_euclid(coarse) == anchor
    };

    let window = usize::try_from(end - start).unwrap_or(0) + 1;
    let mut dates: Vec<Date> = start
        .into_inner()
        .iter_days()
        .take(window)
        .map(Date::from)
        .filter(|d| selected(d.serial()))
        .collect();

    if dates.first() != Some(&start) {
        dates.insert(0, start);
    }
    if dates.last() != Some(&end) {
        dates.push(end);
    }
    dates
}

/// Observation schedule bound to a reference window.
///
/// Wraps the window and sampling densities; an incomplete or inverted
/// window degrades to a single observation on the calculation period end.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{ObservationSchedule, SamplingConfig};
/// use pricer_core::types::time::Date;
///
/// let period_end = Date::from_ymd(2020, 6, 3).unwrap();
/// let schedule = ObservationSchedule::new(None, None, SamplingConfig::default());
///
/// assert_eq!(schedule.event_dates(&period_end), vec![period_end]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationSchedule {
    start: Option<Date>,
    end: Option<Date>,
    sampling: SamplingConfig,
}

impl ObservationSchedule {
    /// Creates a schedule over an optional reference window.
    pub fn new(start: Option<Date>, end: Option<Date>, sampling: SamplingConfig) -> Self {
        Self {
            start,
            end,
            sampling,
        }
    }

    /// Returns the reference window when both ends are present and ordered.
    pub fn window(&self) -> Option<(Date, Date)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) if s <= e => Some((s, e)),
            _ => None,
        }
    }

    /// Returns the sampling densities.
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Returns the observation dates for a calculation period.
    pub fn event_dates<P: CalculationPeriod + ?Sized>(&self, period: &P) -> Vec<Date> {
        match self.window() {
            Some((start, end)) => observation_dates(start, end, &self.sampling),
            None => vec![period.end_date()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedules::Period;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_short_window_is_fine_sampled() {
        // 2020-06-01 is serial 43983; 43983 mod 30 = 3.
        let start = d(2020, 1, 1);
        let end = d(2020, 6, 1);
        let dates = observation_dates(start, end, &SamplingConfig::default());

        assert_eq!(dates[0], start);
        assert_eq!(*dates.last().unwrap(), end);
        for pair in dates[1..].windows(2) {
            assert_eq!(pair[1] - pair[0], 30);
        }
        for date in &dates[1..] {
            assert_eq!(date.serial().rem_euclid(30), 3);
        }
        // 152 days: the start plus end, end-30, ..., end-150
        assert_eq!(dates.len(), 7);
    }

    #[test]
    fn test_density_decreases_away_from_end() {
        let start = d(2015, 1, 1);
        let end = d(2020, 6, 1);
        let dates = observation_dates(start, end, &SamplingConfig::default());
        let end_serial = end.serial();

        let gaps: Vec<(i64, i64)> = dates[1..]
            .windows(2)
            .map(|p| (end_serial - p[1].serial(), p[1] - p[0]))
            .collect();

        for (distance, gap) in gaps {
            if distance < 180 {
                assert_eq!(gap, 30);
            } else if distance >= 360 + 180 {
                assert_eq!(gap, 180);
            }
        }
    }

    #[test]
    fn test_start_prepended_once() {
        // Start on the fine grid: must not be duplicated.
        let end = d(2020, 6, 1);
        let start = d(2020, 5, 2); // end - 30
        let dates = observation_dates(start, end, &SamplingConfig::default());
        assert_eq!(dates, vec![start, end]);
    }

    #[test]
    fn test_single_day_window() {
        let day = d(2020, 6, 1);
        assert_eq!(
            observation_dates(day, day, &SamplingConfig::default()),
            vec![day]
        );
    }

    #[test]
    fn test_inverted_window_is_empty() {
        assert!(observation_dates(d(2020, 6, 1), d(2020, 1, 1), &SamplingConfig::default())
            .is_empty());
    }

    #[test]
    fn test_custom_sampling() {
        let start = d(2020, 5, 1);
        let end = d(2020, 6, 1);
        let weekly = SamplingConfig::new(7, 14, 28).unwrap();
        let dates = observation_dates(start, end, &weekly);
        assert_eq!(dates.len(), 6); // start + end, end-7, end-14, end-21, end-28
        assert_eq!(dates[1], d(2020, 5, 4));
    }

    #[test]
    fn test_schedule_without_window_uses_period_end() {
        let period = Period::with_payment_on_end(d(2020, 1, 1), d(2020, 12, 31));
        let missing_end = ObservationSchedule::new(Some(d(2020, 1, 1)), None, Default::default());
        assert_eq!(missing_end.event_dates(&period), vec![d(2020, 12, 31)]);

        let inverted =
            ObservationSchedule::new(Some(d(2020, 6, 1)), Some(d(2020, 1, 1)), Default::default());
        assert_eq!(inverted.window(), None);
        assert_eq!(inverted.event_dates(&period), vec![d(2020, 12, 31)]);
    }

    #[test]
    fn test_schedule_with_window_ignores_period_end() {
        let schedule =
            ObservationSchedule::new(Some(d(2020, 1, 1)), Some(d(2020, 6, 1)), Default::default());
        let dates = schedule.event_dates(&d(2030, 1, 1));
        assert_eq!(dates.first(), Some(&d(2020, 1, 1)));
        assert_eq!(dates.last(), Some(&d(2020, 6, 1)));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_dates_bounded_ordered_and_anchored(
                start_serial in 40_000i64..45_000,
                length in 0i64..2_000,
            ) {
                let start = Date::from_serial(start_serial).unwrap();
                let end = Date::from_serial(start_serial + length).unwrap();
                let dates = observation_dates(start, end, &SamplingConfig::default());

                prop_assert_eq!(dates[0], start);
                prop_assert_eq!(*dates.last().unwrap(), end);
                for pair in dates.windows(2) {
                    prop_assert!(pair[0] < pair[1]);
                }
                for date in &dates {
                    prop_assert!(*date >= start && *date <= end);
                }
            }
        }
    }
}
