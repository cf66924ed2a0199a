//! Calendar dates and day count conventions.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: Year fraction conventions used to turn a
//!   valuation/exercise date pair into a time to expiry
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let valuation = Date::from_ymd(2021, 10, 6).unwrap();
//! let exercise = Date::from_ymd(2021, 11, 19).unwrap();
//!
//! let t = DayCountConvention::Actual365Fixed.year_fraction(valuation, exercise);
//! assert!((t - 44.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Serialises as an ISO 8601 string (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2021, 10, 6).unwrap();
/// let parsed: Date = "2021-10-06".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let later = date.add_days(5).unwrap();
/// assert_eq!(later - date, 5);
/// assert_eq!(later.to_string(), "2021-10-11");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Errors
    /// `DateError::InvalidDate` when the components do not form a calendar date.
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the date `days` calendar days later.
    ///
    /// # Errors
    /// `DateError::OutOfRange` if the result is beyond chrono's supported range.
    pub fn add_days(self, days: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_days(Days::new(u64::from(days)))
            .map(Date)
            .ok_or(DateError::OutOfRange {
                date: self.to_string(),
                days,
            })
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

    /// Returns the signed number of calendar days from `other` to `self`.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

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

/// Day count convention used for the time to expiry.
///
/// # Variants
/// - `Actual365Fixed`: actual days / 365 (the default for equity options)
/// - `Actual360`: actual days / 360
///
/// ```
/// use pricer_core::types::time::DayCountConvention;
///
/// assert_eq!(DayCountConvention::default(), DayCountConvention::Actual365Fixed);
/// assert_eq!(DayCountConvention::Actual360.name(), "ACT/360");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    #[default]
    Actual365Fixed,

    /// Actual/360: actual_days / 360.0
    Actual360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual365Fixed => "ACT/365F",
            DayCountConvention::Actual360 => "ACT/360",
        }
    }

    #[inline]
    fn days_per_year(&self) -> f64 {
        match self {
            DayCountConvention::Actual365Fixed => 365.0,
            DayCountConvention::Actual360 => 360.0,
        }
    }

    /// Year fraction between two dates.
    ///
    /// Negative when `start > end`, so callers can detect reversed dates
    /// instead of panicking.
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    ///
    /// let yf = DayCountConvention::Actual365Fixed.year_fraction(start, end);
    /// assert!((yf - 182.0 / 365.0).abs() < 1e-12);
    /// assert!(DayCountConvention::Actual360.year_fraction(end, start) < 0.0);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        (end - start) as f64 / self.days_per_year()
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses a convention name (case-insensitive, separators ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' ', '_', '-'], "").as_str() {
            "ACT365" | "ACT365F" | "ACTUAL365" | "ACTUAL365FIXED" | "A365" => {
                Ok(DayCountConvention::Actual365Fixed)
            }
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::Actual360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}
