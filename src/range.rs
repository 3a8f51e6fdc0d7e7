use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, CalendarTag, Gregorian, RataDie};
use crate::{Date, DateError, RANGE_SEPARATOR};

/// An inclusive range between two dates of one calendar.
///
/// Direction is implicit: the range runs from `first` to `last`, ascending
/// if `first` is the earlier endpoint and descending otherwise. Both
/// endpoints' linear day counts are computed once at construction and only
/// read afterwards, which makes [`count`](Self::count) and the direction
/// test O(1); [`contains`](Self::contains) is O(1) through the field
/// triples alone.
///
/// The value is immutable; every traversal borrows it and owns its own
/// cursor, so any number of traversals can run over one range.
#[derive(Debug, Clone, Copy)]
pub struct DateRange<C: Calendar = Gregorian> {
    calendar: C,
    first: Date,
    last: Date,
    first_rd: RataDie,
    last_rd: RataDie,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// An endpoint is tagged with a different calendar than the range's.
    #[error("Calendar mismatch: range calendar is '{expected}', endpoints are '{first}' and '{last}'")]
    CalendarMismatch {
        expected: CalendarTag,
        first: CalendarTag,
        last: CalendarTag,
    },

    /// Error parsing an endpoint date.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl<C: Calendar> DateRange<C> {
    /// Creates a range between two dates of the given calendar, converting
    /// both endpoints onto the linear day-count axis once.
    ///
    /// Either endpoint order is accepted: `first` later than `last` simply
    /// makes the range descending.
    ///
    /// # Errors
    /// Returns `RangeError::CalendarMismatch` if either endpoint carries a
    /// different calendar tag than `calendar`.
    pub fn new(calendar: C, first: Date, last: Date) -> Result<Self, RangeError> {
        let tag = calendar.tag();
        if first.calendar() != tag || last.calendar() != tag {
            return Err(RangeError::CalendarMismatch {
                expected: tag,
                first: first.calendar(),
                last: last.calendar(),
            });
        }
        let first_rd = first.rata_die(&calendar);
        let last_rd = last.rata_die(&calendar);
        Ok(Self {
            calendar,
            first,
            last,
            first_rd,
            last_rd,
        })
    }

    /// Returns the first endpoint (inclusive)
    pub const fn first(&self) -> Date {
        self.first
    }

    /// Returns the last endpoint (inclusive)
    pub const fn last(&self) -> Date {
        self.last
    }

    /// Returns both endpoints as a tuple
    pub const fn endpoints(&self) -> (Date, Date) {
        (self.first, self.last)
    }

    /// Returns the calendar backing this range
    pub const fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Linear day count of the first endpoint
    pub const fn first_rata_die(&self) -> RataDie {
        self.first_rd
    }

    /// Linear day count of the last endpoint
    pub const fn last_rata_die(&self) -> RataDie {
        self.last_rd
    }

    /// Whether the range runs in chronological order. A single-element
    /// range is ascending by convention.
    pub fn is_ascending(&self) -> bool {
        self.first_rd <= self.last_rd
    }

    /// The same span walked in the opposite direction. Reuses the already
    /// computed day counts.
    #[must_use]
    pub fn reversed(&self) -> Self
    where
        C: Clone,
    {
        Self {
            calendar: self.calendar.clone(),
            first: self.last,
            last: self.first,
            first_rd: self.last_rd,
            last_rd: self.first_rd,
        }
    }

    /// Checks if the range contains a given date.
    ///
    /// A date from a different calendar is not a member, never an error.
    /// The comparison uses the endpoint field triples rather than a day
    /// count conversion; within one calendar the triple order agrees with
    /// rata die order (a [`Calendar`] contract), so this is the cheap
    /// equivalent.
    pub fn contains(&self, date: &Date) -> bool {
        if date.calendar() != self.first.calendar() {
            return false;
        }
        let candidate = date.fields();
        let (lower, upper) = if self.is_ascending() {
            (self.first.fields(), self.last.fields())
        } else {
            (self.last.fields(), self.first.fields())
        };
        lower <= candidate && candidate <= upper
    }

    /// Number of dates in the inclusive range, direction-independent.
    /// Never less than 1: equal endpoints still span one day.
    pub const fn count(&self) -> u64 {
        self.first_rd.distance(self.last_rd) + 1
    }

    /// Lazily walks the range from `first` to `last` inclusive, one
    /// calendar conversion per yielded date. The range itself is only
    /// borrowed, so iteration can be restarted any number of times and
    /// independent iterators never interfere.
    pub fn iter(&self) -> crate::Iter<'_, C> {
        crate::Iter::new(&self.calendar, self.first_rd, self.last_rd)
    }

    /// Normalized `(earliest, latest)` day counts, independent of
    /// direction.
    const fn span(&self) -> (i64, i64) {
        let a = self.first_rd.get();
        let b = self.last_rd.get();
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Checks if this range shares at least one day with another range.
    /// Ranges over different calendars never overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.first.calendar() != other.first.calendar() {
            return false;
        }
        let (self_lower, self_upper) = self.span();
        let (other_lower, other_upper) = other.span();
        self_lower <= other_upper && other_lower <= self_upper
    }

    /// Checks if every day of this range lies within another range,
    /// regardless of either range's direction.
    pub fn is_within(&self, other: &Self) -> bool {
        if self.first.calendar() != other.first.calendar() {
            return false;
        }
        let (self_lower, self_upper) = self.span();
        let (other_lower, other_upper) = other.span();
        other_lower <= self_lower && self_upper <= other_upper
    }
}

impl DateRange<Gregorian> {
    /// Creates a Gregorian range.
    ///
    /// # Errors
    /// Same conditions as [`DateRange::new`].
    pub fn gregorian(first: Date, last: Date) -> Result<Self, RangeError> {
        Self::new(Gregorian, first, last)
    }
}

// Endpoints determine the range; the calendar value itself carries no
// identity beyond its tag, which the endpoints already hold.
impl<C: Calendar> PartialEq for DateRange<C> {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first && self.last == other.last
    }
}

impl<C: Calendar> Eq for DateRange<C> {}

impl<C: Calendar> Hash for DateRange<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.first.hash(state);
        self.last.hash(state);
    }
}

impl<C: Calendar> fmt::Display for DateRange<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}{}", self.first, self.last)
    }
}

impl<'a, C: Calendar> IntoIterator for &'a DateRange<C> {
    type Item = Date;
    type IntoIter = crate::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for DateRange<Gregorian> {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 extended format: use RANGE_SEPARATOR to separate the endpoints
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                // SAFETY: We just verified separator_count == 1, so find() must succeed
                let pos = trimmed.find(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!(
                        "Separator '{RANGE_SEPARATOR}' not found despite count == 1"
                    ))
                })?;
                let first = trimmed[..pos].trim().parse::<Date>()?;
                let last = trimmed[pos + 1..].trim().parse::<Date>()?;

                Self::gregorian(first, last)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange<Gregorian> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange<Gregorian> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
