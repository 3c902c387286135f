//! Calendar dates and serial day arithmetic.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Serial day numbers (days since 1899-12-30, the spreadsheet convention)
//!   used by observation schedule generation
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::Date;
//!
//! let start = Date::from_ymd(2020, 1, 1).unwrap();
//! let end = Date::from_ymd(2020, 6, 1).unwrap();
//!
//! assert_eq!(end - start, 152);
//! assert_eq!(start.serial(), 43831);
//! assert_eq!(Date::from_serial(43831).unwrap(), start);
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Serial number origin: serial 0 is 1899-12-30.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

fn serial_epoch() -> NaiveDate {
    let (y, m, d) = SERIAL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation, serial day numbers, and day arithmetic.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let leap = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// let invalid = Date::parse("not-a-date");
    /// assert!(invalid.is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Creates a Date from its serial day number.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::from_serial(25569).unwrap();
    /// assert_eq!(date.to_string(), "1970-01-01");
    /// ```
    pub fn from_serial(serial: i64) -> Result<Self, DateError> {
        serial_epoch()
            .checked_add_signed(Duration::days(serial))
            .map(Date)
            .ok_or(DateError::SerialOutOfRange(serial))
    }

    /// Returns the serial day number (days since 1899-12-30).
    #[inline]
    pub fn serial(&self) -> i64 {
        (self.0 - serial_epoch()).num_days()
    }

    /// Returns the date `days` calendar days later (earlier if negative).
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        self.0
            .checked_add_signed(Duration::days(days))
            .map(Date)
            .ok_or(DateError::SerialOutOfRange(self.serial() + days))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
