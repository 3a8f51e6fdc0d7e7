use crate::DateError;
use crate::consts::MAX_YEAR;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::num::NonZeroU16;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999).
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
///
/// The upper bound is a crate-wide supported span, independent of the
/// calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateError> {
        let non_zero = NonZeroU16::new(value).ok_or(DateError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(DateError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Builds a Year from a value already known to be valid, e.g. one
    /// produced by a calendar's rata-die inverse. Panics on zero.
    pub(crate) const fn new_unchecked(value: u16) -> Self {
        match NonZeroU16::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("year must be nonzero"),
        }
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month number guaranteed to be non-zero.
///
/// The upper bound depends on the calendar system (not every calendar has
/// 12 months), so it is checked by [`Date::new`](crate::Date::new) against
/// the calendar rather than here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0.
    pub fn new(value: u8) -> Result<Self, DateError> {
        NonZeroU8::new(value)
            .map(Self)
            .ok_or(DateError::InvalidMonth(value))
    }

    /// Builds a Month from a calendar-produced value. Panics on zero.
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("month must be nonzero"),
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day-of-month number guaranteed to be non-zero.
///
/// As with [`Month`], the upper bound depends on the calendar (and on the
/// year and month), so it is checked at `Date` construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0.
    pub fn new(value: u8) -> Result<Self, DateError> {
        NonZeroU8::new(value)
            .map(Self)
            .ok_or(DateError::InvalidDay(value))
    }

    /// Builds a Day from a calendar-produced value. Panics on zero.
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("day must be nonzero"),
        }
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2000).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid_zero() {
        let result = Year::new(0);
        assert!(matches!(result, Err(DateError::InvalidYear(0))));
    }

    #[test]
    fn test_year_new_invalid_too_large() {
        let result = Year::new(10000);
        assert!(matches!(result, Err(DateError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_get_and_display() {
        let year = Year::new(2024).unwrap();
        assert_eq!(year.get(), 2024);
        assert_eq!(year.to_string(), "2024");
    }

    #[test]
    fn test_year_try_from_u16() {
        let year: Year = 2024.try_into().unwrap();
        assert_eq!(year.get(), 2024);

        let result: Result<Year, _> = 0.try_into();
        assert!(result.is_err());

        let result: Result<Year, _> = 10000.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_year_into_u16() {
        let year = Year::new(2024).unwrap();
        let value: u16 = year.into();
        assert_eq!(value, 2024);
    }

    #[test]
    fn test_year_ordering() {
        let y1 = Year::new(2020).unwrap();
        let y2 = Year::new(2024).unwrap();
        assert!(y1 < y2);
        assert!(y2 > y1);
        assert_eq!(y1, y1);
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2024).unwrap();
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2024");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);
    }

    #[test]
    fn test_month_new_valid() {
        // Thirteen is fine here; the calendar-specific bound is applied at
        // Date construction, not by the newtype.
        for m in 1..=13 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid_zero() {
        let result = Month::new(0);
        assert!(matches!(result, Err(DateError::InvalidMonth(0))));
    }

    #[test]
    fn test_month_get_and_display() {
        let month = Month::new(8).unwrap();
        assert_eq!(month.get(), 8);
        assert_eq!(month.to_string(), "8");
    }

    #[test]
    fn test_month_try_from_u8() {
        let month: Month = 8.try_into().unwrap();
        assert_eq!(month.get(), 8);

        let result: Result<Month, _> = 0.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_month_into_u8() {
        let month = Month::new(8).unwrap();
        let value: u8 = month.into();
        assert_eq!(value, 8);
    }

    #[test]
    fn test_month_serde() {
        let month = Month::new(8).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "8");

        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(month, parsed);
    }

    #[test]
    fn test_day_new_valid() {
        assert!(Day::new(1).is_ok());
        assert!(Day::new(31).is_ok());
    }

    #[test]
    fn test_day_new_invalid_zero() {
        let result = Day::new(0);
        assert!(matches!(result, Err(DateError::InvalidDay(0))));
    }

    #[test]
    fn test_day_get_and_display() {
        let day = Day::new(15).unwrap();
        assert_eq!(day.get(), 15);
        assert_eq!(day.to_string(), "15");
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_day_ordering() {
        let d1 = Day::new(10).unwrap();
        let d2 = Day::new(20).unwrap();
        assert!(d1 < d2);
        assert!(d2 > d1);
        assert_eq!(d1, d1);
    }

    #[test]
    fn test_day_serde() {
        let day = Day::new(15).unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "15");

        let parsed: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(day, parsed);
    }
}
