use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_4_YEARS, DAYS_PER_100_YEARS, DAYS_PER_400_YEARS,
    DAYS_PER_YEAR, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, GREGORIAN_MONTHS, JANUARY,
    LEAP_YEAR_CYCLE, MARCH,
};
use crate::prelude::*;

/// Identifies a calendar system. Two dates can only be compared or grouped
/// into a range when their tags match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct CalendarTag(&'static str);

impl CalendarTag {
    /// Creates a tag from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the tag name
    #[inline]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

/// Tag of the built-in proleptic Gregorian calendar.
pub const GREGORIAN: CalendarTag = CalendarTag::new("gregorian");

/// A signed linear day count ("rata die"): days elapsed since the epoch,
/// with rata die 1 being the first supported day of the calendar
/// (0001-01-01 for Gregorian).
///
/// Once a date is converted onto this axis, ordering and arithmetic are
/// plain integer operations, independent of the calendar that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct RataDie(i64);

impl RataDie {
    /// Creates a rata die from a raw day count
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw day count as i64
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Number of days between two rata dies, ignoring direction
    #[inline]
    pub const fn distance(self, other: Self) -> u64 {
        self.0.abs_diff(other.0)
    }
}

/// A calendar system: a bidirectional mapping between structured
/// `(year, month, day)` fields and the linear [`RataDie`] axis, plus the
/// field bounds needed to validate dates.
///
/// `date_from_rata_die` must be a pure, total, deterministic inverse of
/// `rata_die` for every day count reachable between two converted dates,
/// and the natural `(year, month, day)` tuple order must agree with rata
/// die order within the calendar. Range membership relies on both.
pub trait Calendar {
    /// Tag identifying this calendar system
    fn tag(&self) -> CalendarTag;

    /// Number of months in the given year
    fn months_in_year(&self, year: u16) -> u8;

    /// Number of days in the given month
    fn days_in_month(&self, year: u16, month: u8) -> u8;

    /// Converts structured fields to a linear day count
    fn rata_die(&self, year: u16, month: u8, day: u8) -> RataDie;

    /// Converts a linear day count back to structured fields
    fn date_from_rata_die(&self, rd: RataDie) -> (u16, u8, u8);
}

// A borrowed calendar is a calendar, so one value can back many ranges.
impl<C: Calendar + ?Sized> Calendar for &C {
    fn tag(&self) -> CalendarTag {
        (**self).tag()
    }

    fn months_in_year(&self, year: u16) -> u8 {
        (**self).months_in_year(year)
    }

    fn days_in_month(&self, year: u16, month: u8) -> u8 {
        (**self).days_in_month(year, month)
    }

    fn rata_die(&self, year: u16, month: u8, day: u8) -> RataDie {
        (**self).rata_die(year, month, day)
    }

    fn date_from_rata_die(&self, rd: RataDie) -> (u16, u8, u8) {
        (**self).date_from_rata_die(rd)
    }
}

/// The proleptic Gregorian calendar, years 1..=9999. Rata die 1 is
/// 0001-01-01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gregorian;

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn gregorian_days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= GREGORIAN_MONTHS);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

impl Gregorian {
    /// Year containing the given rata die, by peeling off complete
    /// 400/100/4/1-year cycles.
    fn year_from_rata_die(rd: i64) -> u16 {
        let d0 = rd - 1;
        let n400 = d0.div_euclid(DAYS_PER_400_YEARS);
        let d1 = d0.rem_euclid(DAYS_PER_400_YEARS);
        let n100 = d1 / DAYS_PER_100_YEARS;
        let d2 = d1 % DAYS_PER_100_YEARS;
        let n4 = d2 / DAYS_PER_4_YEARS;
        let d3 = d2 % DAYS_PER_4_YEARS;
        let n1 = d3 / DAYS_PER_YEAR;

        let year = 400 * n400 + 100 * n100 + 4 * n4 + n1;
        // n100 == 4 or n1 == 4 means day 366 of a leap year: still the
        // same year, otherwise the count of whole elapsed years is one
        // short of the current year.
        if n100 == 4 || n1 == 4 {
            year as u16
        } else {
            (year + 1) as u16
        }
    }
}

impl Calendar for Gregorian {
    fn tag(&self) -> CalendarTag {
        GREGORIAN
    }

    fn months_in_year(&self, _year: u16) -> u8 {
        GREGORIAN_MONTHS
    }

    fn days_in_month(&self, year: u16, month: u8) -> u8 {
        gregorian_days_in_month(year, month)
    }

    fn rata_die(&self, year: u16, month: u8, day: u8) -> RataDie {
        let y = i64::from(year);
        let m = i64::from(month);
        let d = i64::from(day);

        let mut rd = DAYS_PER_YEAR * (y - 1)
            + (y - 1) / i64::from(LEAP_YEAR_CYCLE)
            - (y - 1) / i64::from(CENTURY_CYCLE)
            + (y - 1) / i64::from(GREGORIAN_CYCLE)
            + (367 * m - 362) / 12
            + d;
        // The month term assumes a 30.6-day March..February rhythm;
        // correct for February's actual length once past it.
        if month > FEBRUARY {
            rd -= if is_leap_year(year) { 1 } else { 2 };
        }
        RataDie::new(rd)
    }

    fn date_from_rata_die(&self, rd: RataDie) -> (u16, u8, u8) {
        let year = Self::year_from_rata_die(rd.get());
        let prior_days = rd.get() - self.rata_die(year, JANUARY, 1).get();
        let correction = if rd < self.rata_die(year, MARCH, 1) {
            0
        } else if is_leap_year(year) {
            1
        } else {
            2
        };
        let month = ((12 * (prior_days + correction) + 373) / 367) as u8;
        let day = (rd.get() - self.rata_die(year, month, 1).get() + 1) as u8;
        (year, month, day)
    }
}
