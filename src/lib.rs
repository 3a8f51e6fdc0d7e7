mod calendar;
mod consts;
mod iter;
mod prelude;
mod range;
mod types;

pub use calendar::{
    Calendar, CalendarTag, GREGORIAN, Gregorian, RataDie, gregorian_days_in_month, is_leap_year,
};
pub use consts::*;
pub use iter::Iter;
pub use range::{DateRange, RangeError};
pub use types::{Day, Month, Year};

use crate::prelude::*;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A calendar date: validated `(year, month, day)` fields tagged with the
/// calendar system they were validated against.
///
/// Dates from different calendars never compare: `partial_cmp` is `None`
/// across tags, and range operations treat a foreign-calendar date as
/// simply not a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    calendar: CalendarTag,
    year: Year,
    month: Month,
    day: Day,
}

/// Error type for date construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {_0}")]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day: {_0}")]
    InvalidDay(u8),
    #[display(fmt = "Month {month} does not exist in year {year} ({months_in_year} months)")]
    MonthOutOfRange {
        year: u16,
        month: u8,
        months_in_year: u8,
    },
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    DayOutOfRange { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

impl Date {
    /// Creates a date validated against the given calendar and tagged with
    /// its [`CalendarTag`].
    ///
    /// # Errors
    /// Returns a `DateError` if any component is zero, the year exceeds
    /// `MAX_YEAR`, or month/day fall outside the calendar's bounds for
    /// that year.
    pub fn new<C: Calendar>(calendar: &C, year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year_t = Year::new(year)?;
        let month_t = Month::new(month)?;
        let day_t = Day::new(day)?;

        let months = calendar.months_in_year(year);
        if month > months {
            return Err(DateError::MonthOutOfRange {
                year,
                month,
                months_in_year: months,
            });
        }
        if day > calendar.days_in_month(year, month) {
            return Err(DateError::DayOutOfRange { year, month, day });
        }

        Ok(Self {
            calendar: calendar.tag(),
            year: year_t,
            month: month_t,
            day: day_t,
        })
    }

    /// Creates a proleptic Gregorian date.
    ///
    /// # Errors
    /// Same conditions as [`Date::new`].
    pub fn gregorian(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        Self::new(&Gregorian, year, month, day)
    }

    /// Converts a linear day count back to a date via the calendar.
    ///
    /// Trusts the calendar's inverse conversion; a calendar that returns a
    /// zero field here violates the [`Calendar`] contract and panics.
    pub fn from_rata_die<C: Calendar>(calendar: &C, rd: RataDie) -> Self {
        let (year, month, day) = calendar.date_from_rata_die(rd);
        Self {
            calendar: calendar.tag(),
            year: Year::new_unchecked(year),
            month: Month::new_unchecked(month),
            day: Day::new_unchecked(day),
        }
    }

    /// Linear day count of this date under the given calendar
    pub fn rata_die<C: Calendar>(&self, calendar: &C) -> RataDie {
        debug_assert!(self.calendar == calendar.tag());
        calendar.rata_die(self.year(), self.month(), self.day())
    }

    /// Tag of the calendar this date belongs to
    pub const fn calendar(&self) -> CalendarTag {
        self.calendar
    }

    /// Returns the year component as u16
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component as u8
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day component as u8
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// The `(year, month, day)` field triple. Within one calendar its
    /// natural tuple order matches rata die order, which is what makes
    /// O(1) membership tests valid.
    pub const fn fields(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }
}

impl PartialOrd for Date {
    /// Field-triple order within one calendar; incomparable across
    /// calendars.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.calendar == other.calendar {
            Some(self.fields().cmp(&other.fields()))
        } else {
            None
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.get(),
            self.month.get(),
            self.day.get()
        )
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a strict ISO `YYYY-MM-DD` date, validated against the
    /// Gregorian calendar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(DateError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD: {s}"
            )));
        }

        let year = parse_u16(parts[0])?;
        let month = parse_u8(parts[1])?;
        let day = parse_u8(parts[2])?;
        Self::gregorian(year, month, day)
    }
}

/// Helper to parse u16 with better error messages
fn parse_u16(s: &str) -> Result<u16, DateError> {
    s.parse::<u16>()
        .map_err(|_| DateError::InvalidFormat(s.to_owned()))
}

/// Helper to parse u8 with better error messages
fn parse_u8(s: &str) -> Result<u8, DateError> {
    s.parse::<u8>()
        .map_err(|_| DateError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Only the Gregorian string form round-trips; other calendars
        // have no parseable representation.
        if self.calendar != GREGORIAN {
            return Err(serde::ser::Error::custom(format!(
                "cannot serialize date from calendar '{}'",
                self.calendar
            )));
        }
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod tests {
    use super::test_utils::{THIRTEEN_MOON, ThirteenMoon, gdate};
    use super::*;

    #[test]
    fn test_new_validates_against_calendar() {
        assert!(Date::gregorian(2024, 2, 29).is_ok());
        assert!(matches!(
            Date::gregorian(2023, 2, 29),
            Err(DateError::DayOutOfRange {
                year: 2023,
                month: 2,
                day: 29
            })
        ));
        assert!(matches!(
            Date::gregorian(2024, 13, 1),
            Err(DateError::MonthOutOfRange {
                year: 2024,
                month: 13,
                months_in_year: 12
            })
        ));
        assert!(matches!(
            Date::gregorian(0, 1, 1),
            Err(DateError::InvalidYear(0))
        ));
        assert!(matches!(
            Date::gregorian(2024, 0, 1),
            Err(DateError::InvalidMonth(0))
        ));
        assert!(matches!(
            Date::gregorian(2024, 1, 0),
            Err(DateError::InvalidDay(0))
        ));
    }

    #[test]
    fn test_new_respects_pluggable_bounds() {
        // Month 13 is invalid in Gregorian but fine in the test calendar.
        let date = Date::new(&ThirteenMoon, 5, 13, 28).expect("month 13 valid in 13-month calendar");
        assert_eq!(date.calendar(), THIRTEEN_MOON);
        assert_eq!(date.fields(), (5, 13, 28));

        assert!(matches!(
            Date::new(&ThirteenMoon, 5, 14, 1),
            Err(DateError::MonthOutOfRange { .. })
        ));
        assert!(matches!(
            Date::new(&ThirteenMoon, 5, 13, 29),
            Err(DateError::DayOutOfRange { .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let date = gdate(1991, 8, 15);
        assert_eq!(date.calendar(), GREGORIAN);
        assert_eq!(date.year(), 1991);
        assert_eq!(date.month(), 8);
        assert_eq!(date.day(), 15);
        assert_eq!(date.fields(), (1991, 8, 15));
    }

    #[test]
    fn test_rata_die_round_trip() {
        let date = gdate(1970, 1, 1);
        let rd = date.rata_die(&Gregorian);
        assert_eq!(rd.get(), 719_163);
        assert_eq!(Date::from_rata_die(&Gregorian, rd), date);
    }

    #[test]
    fn test_ordering_same_calendar() {
        let a = gdate(1991, 8, 15);
        let b = gdate(1991, 8, 16);
        let c = gdate(1992, 1, 1);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.partial_cmp(&a), Some(std::cmp::Ordering::Equal));
    }

    #[test]
    fn test_ordering_across_calendars_is_none() {
        let gregorian = gdate(5, 1, 1);
        let other = Date::new(&ThirteenMoon, 5, 1, 1).expect("valid thirteen-moon date");
        assert_eq!(gregorian.partial_cmp(&other), None);
        assert_ne!(gregorian, other);
    }

    #[test]
    fn test_display() {
        assert_eq!(gdate(1991, 8, 15).to_string(), "1991-08-15");
        assert_eq!(gdate(1, 1, 1).to_string(), "0001-01-01");
    }

    #[test]
    fn test_from_str_valid() {
        let date = "1991-08-15".parse::<Date>().expect("valid ISO date");
        assert_eq!(date, gdate(1991, 8, 15));
        assert_eq!(date.calendar(), GREGORIAN);
    }

    #[test]
    fn test_from_str_with_whitespace() {
        let date = " 1991 - 08 - 15 ".parse::<Date>().expect("whitespace trimmed");
        assert_eq!(date, gdate(1991, 8, 15));
    }

    #[test]
    fn test_from_str_rejects_partial_dates() {
        assert!(matches!(
            "1991".parse::<Date>(),
            Err(DateError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1991-08".parse::<Date>(),
            Err(DateError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1991-08-15-23".parse::<Date>(),
            Err(DateError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_str_empty() {
        assert!(matches!("".parse::<Date>(), Err(DateError::EmptyInput)));
        assert!(matches!("   ".parse::<Date>(), Err(DateError::EmptyInput)));
    }

    #[test]
    fn test_from_str_bad_tokens() {
        assert!(matches!(
            "199A-01-01".parse::<Date>(),
            Err(DateError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1991-XX-01".parse::<Date>(),
            Err(DateError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_str_validates() {
        assert!(matches!(
            "2023-02-29".parse::<Date>(),
            Err(DateError::DayOutOfRange { .. })
        ));
        assert!(matches!(
            "2023-13-01".parse::<Date>(),
            Err(DateError::MonthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_serde_string_format() {
        let date = gdate(1991, 8, 15);
        let json = serde_json::to_string(&date).expect("failed to serialize date");
        assert_eq!(json, r#""1991-08-15""#);

        let parsed: Date = serde_json::from_str(&json).expect("failed to deserialize date");
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let result: Result<Date, _> = serde_json::from_str(r#""2023-02-29""#);
        assert!(result.is_err());

        let result: Result<Date, _> = serde_json::from_str(r#""10000-01-01""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_rejects_foreign_calendar() {
        let date = Date::new(&ThirteenMoon, 5, 13, 1).expect("valid thirteen-moon date");
        let result = serde_json::to_string(&date);
        assert!(result.is_err());
    }
}
